//! Markdown code-fence unwrapping for model replies.

const FENCE: &str = "```";

/// Strip a leading markdown code fence from a model reply.
///
/// Models regularly wrap JSON in ```` ```json ... ``` ```` despite being told
/// not to. When `raw` (after trimming) starts with a fence, the text between
/// the first fence and the next one is returned, minus an optional `json`
/// language tag. Anything after the closing fence, including further fenced
/// blocks, is discarded. Input that does not start with a fence is returned
/// trimmed and otherwise untouched.
///
/// The `json` tag is matched case-insensitively, so `JSON` and `Json` are
/// stripped too.
#[must_use]
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(after_open) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };

    let body = after_open
        .find(FENCE)
        .map_or(after_open, |close| &after_open[..close]);

    strip_language_tag(body).trim()
}

fn strip_language_tag(body: &str) -> &str {
    match body.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &body[4..],
        _ => body,
    }
}
