/// Derive the display first name from a collaborator's full name.
///
/// Splits on the first space, or failing that on the first `.`, and
/// capitalizes the leading part ("anna.schmidt" -> "Anna").
pub fn first_name(full_name: &str) -> String {
    let leading = [' ', '.']
        .iter()
        .find(|sep| full_name.contains(**sep))
        .and_then(|sep| full_name.split(*sep).next())
        .unwrap_or(full_name);

    capitalize(leading).trim().to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
