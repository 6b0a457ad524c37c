//! Terminal output sanitization
//!
//! Post text comes straight from a user-supplied archive and is printed verbatim by the
//! `show` and `browse` commands. Escape sequences embedded in that text could clear the
//! screen, move the cursor, or set window titles, so everything printed from a record goes
//! through [`sanitize_for_terminal`] first.

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Removes ANSI CSI and OSC escape sequences and stray control characters.
///
/// Tabs and newlines survive; a carriage return is dropped so it cannot overwrite the
/// start of a printed line.
///
/// # Examples
///
/// ```
/// use archive_sampler::utils::terminal::sanitize_for_terminal;
///
/// assert_eq!(sanitize_for_terminal("\x1b[31mRed\x1b[0m post"), "Red post");
/// ```
pub fn sanitize_for_terminal(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.peek() {
                // CSI: ESC [ params final-letter
                Some('[') => {
                    chars.next();
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
                // OSC: ESC ] payload (BEL | ESC \)
                Some(']') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == BEL {
                            break;
                        }
                        if next == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' {
            continue;
        }

        result.push(ch);
    }

    result
}
