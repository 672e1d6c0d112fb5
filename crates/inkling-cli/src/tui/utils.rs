use ratatui::text::Span;

use crate::CliError;

/// Split a command line on whitespace, keeping quoted runs together.
pub fn split_args(line: &str) -> Result<Vec<String>, CliError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut has_token = false;

    for ch in line.chars() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                has_token = true;
            }
            None if ch.is_whitespace() => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            None => {
                current.push(ch);
                has_token = true;
            }
        }
    }

    if let Some(open) = quote {
        return Err(CliError::InvalidInput(format!("unclosed {open} quote")));
    }
    if has_token {
        args.push(current);
    }
    Ok(args)
}

/// Tail of `input` that fits next to the prompt, and the cursor column.
///
/// Widths are display columns, so CJK text scrolls correctly.
pub fn clipped_input(input: &str, total_width: usize, prefix_len: usize) -> (String, u16) {
    let max_width = total_width.saturating_sub(prefix_len + 1);
    let mut width = 0;
    let mut start = input.len();
    for (index, ch) in input.char_indices().rev() {
        let ch_width = Span::raw(ch.to_string()).width();
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        start = index;
    }
    (input[start..].to_string(), width as u16)
}
