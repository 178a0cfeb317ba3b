//! Book Assembler
//!
//! Concatenates fetched chapters into one Markdown body with page breaks
//! between them, then strips characters the converter cannot render.

use crate::models::Chapter;

/// Separator between adjacent chapters: blank line, page-break directive,
/// blank line. The directive makes the converter start each chapter on a
/// fresh page.
pub const PAGE_BREAK: &str = "\n\n\\newpage\n\n";

/// Join chapter bodies in their given order into a single sanitized body.
pub fn assemble(chapters: &[Chapter]) -> String {
    let joined = chapters
        .iter()
        .map(|chapter| chapter.body.as_str())
        .collect::<Vec<_>>()
        .join(PAGE_BREAK);
    sanitize(&joined)
}

/// Drop every character outside the Basic Multilingual Plane. The rendering
/// engine aborts on astral-plane symbols missing from the fallback font, so
/// losing them beats losing the whole book.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| u32::from(*c) <= 0xFFFF).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(name: &str, body: &str) -> Chapter {
        Chapter {
            name: name.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn joins_two_chapters_with_exactly_one_page_break() {
        let chapters = vec![chapter("a.md", "X"), chapter("b.md", "Y")];
        assert_eq!(assemble(&chapters), "X\n\n\\newpage\n\nY");
    }

    #[test]
    fn a_single_chapter_gets_no_separator() {
        let chapters = vec![chapter("only.md", "# Alone")];
        assert_eq!(assemble(&chapters), "# Alone");
    }

    #[test]
    fn no_chapters_yield_an_empty_body() {
        assert_eq!(assemble(&[]), "");
    }

    #[test]
    fn preserves_chapter_order_as_given() {
        let chapters = vec![
            chapter("INSTALL.md", "install"),
            chapter("README.md", "readme"),
            chapter("USAGE.md", "usage"),
        ];
        assert_eq!(
            assemble(&chapters),
            "install\n\n\\newpage\n\nreadme\n\n\\newpage\n\nusage"
        );
    }

    #[test]
    fn sanitize_drops_astral_plane_characters() {
        assert_eq!(sanitize("ok \u{1F600} fine"), "ok  fine");
        assert_eq!(sanitize("\u{10348}"), "");
    }

    #[test]
    fn sanitize_keeps_bmp_characters_in_order() {
        let text = "caf\u{e9} \u{4e2d}\u{6587} \u{2713} \u{ffff}";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn assemble_sanitizes_the_joined_body() {
        let chapters = vec![chapter("a.md", "X\u{1F680}"), chapter("b.md", "Y")];
        assert_eq!(assemble(&chapters), "X\n\n\\newpage\n\nY");
    }
}
