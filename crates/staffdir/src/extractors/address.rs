// ABOUTME: Decodes the school postal address carried in a mapping/directions link.
// ABOUTME: Reads the raw destination query value, undoes the "+" encoding, and splits out state and zip.

use std::borrow::Cow;

/// Raw (undecoded) value of query parameter `param` in `href`.
///
/// The value is returned exactly as written so that `++` sequences survive
/// for [`decode_address`]; standard form decoding would fold them into spaces.
pub fn raw_query_value<'a>(href: &'a str, param: &str) -> Option<&'a str> {
    let query = href.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or(query);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == param)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Turn an encoded destination value into a readable postal address.
///
/// `++` marks a comma break and `+` a space; any remaining `%XX` escapes are
/// percent-decoded when they form valid UTF-8.
pub fn decode_address(raw: &str) -> String {
    let spaced = raw.replace("++", ", ").replace('+', " ");
    let decoded = match urlencoding::decode(&spaced) {
        Ok(Cow::Owned(decoded)) => decoded,
        Ok(Cow::Borrowed(_)) | Err(_) => spaced.clone(),
    };
    decoded.trim().to_string()
}

/// Decoded address from a mapping link, or `None` when the parameter is absent.
pub fn address_from_link(href: &str, param: &str) -> Option<String> {
    let decoded = decode_address(raw_query_value(href, param)?);
    if decoded.is_empty() {
        None
    } else {
        Some(decoded)
    }
}

/// The last two whitespace tokens of `address`, as `(state, zip)`.
pub fn state_and_zip(address: &str) -> Option<(String, String)> {
    let mut tokens = address.split_whitespace().rev();
    let zip = tokens.next()?;
    let state = tokens.next()?;
    Some((state.to_string(), zip.to_string()))
}
