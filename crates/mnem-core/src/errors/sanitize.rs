/// Strip filesystem paths and anything that looks like a connection string
/// out of an error message before it reaches a caller. Mirrors the
/// path-redaction pass the teacher's storage layer applies to raw sqlite
/// error text.
pub fn sanitize_message(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    for token in message.split_whitespace() {
        if looks_like_path(token) {
            out.push_str("<path>");
        } else {
            out.push_str(token);
        }
        out.push(' ');
    }
    out.trim_end().to_string()
}

fn looks_like_path(token: &str) -> bool {
    let bare = token.trim_matches(|c: char| "\"'.,:;()[]".contains(c));
    (bare.starts_with('/') || bare.starts_with("./") || bare.starts_with("../"))
        && bare.len() > 1
}
