/// Prepare ABNF text for parsing: trailing whitespace and blank lines go,
/// and the indentation shared by every remaining line is removed so grammars
/// can be written as indented blocks inside other source.
pub fn normalize(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();
    let indent = lines
        .iter()
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);

    let mut out = String::with_capacity(text.len());
    for line in lines {
        let start = line
            .char_indices()
            .nth(indent)
            .map_or(line.len(), |(idx, _)| idx);
        out.push_str(&line[start..]);
        out.push('\n');
    }
    out
}
