/// Longest entity body we try to resolve, e.g. `#x1F600` or `hellip`
const MAX_ENTITY_LEN: usize = 10;

/// Decode HTML character references in post text.
///
/// Archives store text HTML-escaped (`&amp;`, `&lt;`, `&gt;`), plus the occasional numeric
/// reference. Decoding is single-pass, so `&amp;lt;` becomes `&lt;`, not `<`. Unknown or
/// malformed references are left as written. Numeric references to NUL, a surrogate, or a
/// code point past U+10FFFF become U+FFFD.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];

        let decoded = tail
            .find(';')
            .filter(|&semi| semi > 0 && semi <= MAX_ENTITY_LEN)
            .and_then(|semi| resolve_entity(&tail[..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

fn resolve_entity(body: &str) -> Option<char> {
    if let Some(numeric) = body.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        // Code 0 and invalid scalar values decode to U+FFFD
        if code == 0 {
            return Some(char::REPLACEMENT_CHARACTER);
        }
        return Some(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
    }

    let c = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "hellip" => '…',
        "mdash" => '—',
        "ndash" => '–',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        _ => return None,
    };
    Some(c)
}
