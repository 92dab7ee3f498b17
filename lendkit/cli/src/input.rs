use {anyhow::bail, lendkit_math::RawWrapped};

/// Read the bytes of a wrapped value from the command line.
///
/// Accepted forms:
///
/// - hex, with or without a `0x` prefix: `cdcccccccccc00000000000000000000`
/// - a JSON array: `[205,204,204,204,204,204,0,0,0,0,0,0,0,0,0,0]`
/// - a JSON object as printed in account dumps: `{"value":[205,204,...]}`
///
/// The length is not checked here.
pub fn parse_bytes(input: &str) -> anyhow::Result<Vec<u8>> {
    let input = input.trim();

    if input.starts_with('[') {
        return Ok(serde_json::from_str(input)?);
    }

    if input.starts_with('{') {
        let raw: RawWrapped = serde_json::from_str(input)?;
        return Ok(raw.value);
    }

    let hex_str = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);

    if hex_str.is_empty() {
        bail!("no bytes given");
    }

    Ok(hex::decode(hex_str)?)
}

// ----------------------------------- tests -----------------------------------
