//! Text extraction utilities
//!
//! This module handles extraction of run text and inline hyperlink structure
//! from docx-rs paragraph and run elements.

use super::super::models::*;

/// Extract the ordered inline children (runs and hyperlinks) of a paragraph
pub(crate) fn extract_inline_children(para: &docx_rs::Paragraph) -> Vec<Inline> {
    let mut inlines = Vec::new();

    for child in &para.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => {
                inlines.push(Inline::Run(extract_run_text(run)));
            }
            docx_rs::ParagraphChild::Hyperlink(link) => {
                let fragments = link
                    .children
                    .iter()
                    .filter_map(|child| match child {
                        docx_rs::ParagraphChild::Run(run) => Some(extract_run_text(run)),
                        _ => None,
                    })
                    .collect();

                inlines.push(Inline::Hyperlink(Hyperlink {
                    target: hyperlink_target(&link.link),
                    fragments,
                }));
            }
            _ => {
                // Bookmarks, comments and tracked changes carry no visible text here
            }
        }
    }

    inlines
}

/// Plain text of a paragraph, hyperlink text included
pub(crate) fn extract_paragraph_text(para: &docx_rs::Paragraph) -> String {
    extract_inline_children(para)
        .iter()
        .map(Inline::text)
        .collect()
}

/// Extract text from a run
pub(crate) fn extract_run_text(run: &docx_rs::Run) -> String {
    let mut text = String::new();

    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(text_elem) => {
                text.push_str(&text_elem.text);
            }
            docx_rs::RunChild::Tab(_) => {
                text.push('\t');
            }
            docx_rs::RunChild::Break(_) => {
                // Break types are private, so every break becomes a line break
                text.push('\n');
            }
            _ => {}
        }
    }

    text
}

fn hyperlink_target(link: &docx_rs::HyperlinkData) -> LinkTarget {
    match link {
        docx_rs::HyperlinkData::External { rid, .. } => LinkTarget::Relationship(rid.clone()),
        docx_rs::HyperlinkData::Anchor { anchor } => LinkTarget::Anchor(anchor.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_text_with_tabs_and_breaks() {
        let run = docx_rs::Run::new()
            .add_text("Security")
            .add_tab()
            .add_text("Control")
            .add_break(docx_rs::BreakType::TextWrapping)
            .add_text("Manual");

        assert_eq!(extract_run_text(&run), "Security\tControl\nManual");
    }

    #[test]
    fn test_paragraph_runs_in_order() {
        let para = docx_rs::Paragraph::new()
            .add_run(docx_rs::Run::new().add_text("Security Control: "))
            .add_run(docx_rs::Run::new().add_text("1139"));

        let inlines = extract_inline_children(&para);
        assert_eq!(
            inlines,
            vec![
                Inline::Run("Security Control: ".to_string()),
                Inline::Run("1139".to_string()),
            ]
        );
        assert_eq!(extract_paragraph_text(&para), "Security Control: 1139");
    }
}
