use super::{line_headings, parse_sections, plain_text};

#[test]
fn test_two_sections_split_at_headings() {
    let sections = parse_sections("## A\ntext1\n## B\ntext2");

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].id, "a");
    assert_eq!(sections[0].title, "A");
    assert_eq!(sections[0].content, "text1");
    assert_eq!(sections[1].id, "b");
    assert_eq!(sections[1].content, "text2");
}

#[test]
fn test_line_coordinates() {
    let sections = parse_sections("## A\ntext1\n\n## B\ntext2");

    assert_eq!(sections[0].heading_line, 0);
    assert_eq!(sections[0].line_start, 1);
    assert_eq!(sections[0].line_end, 3);
    assert_eq!(sections[1].heading_line, 3);
    assert_eq!(sections[1].line_start, 4);
    assert_eq!(sections[1].line_end, 5);
}

#[test]
fn test_empty_document_has_no_sections() {
    assert!(parse_sections("").is_empty());
}

#[test]
fn test_other_levels_do_not_open_sections() {
    let sections = parse_sections("# Title\n\nIntro\n\n### Deep\n\nMore");
    assert!(sections.is_empty());
}

#[test]
fn test_preamble_is_dropped() {
    let sections = parse_sections("Intro text\n\n### Sub\n\n## First\nbody");

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].title, "First");
    assert_eq!(sections[0].content, "body");
}

#[test]
fn test_deeper_headings_stay_in_content() {
    let sections = parse_sections("## Top\nintro\n### Detail\nmore");

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].content, "intro\n### Detail\nmore");
}

#[test]
fn test_heading_in_code_fence_is_content() {
    let doc = "## Real\n\n```md\n## Not a heading\n```\n";
    let sections = parse_sections(doc);

    assert_eq!(sections.len(), 1);
    assert!(sections[0].content.contains("## Not a heading"));
}

#[test]
fn test_heading_in_block_quote_is_content() {
    let sections = parse_sections("## A\n\n> ## Quoted\n\nbody");

    assert_eq!(sections.len(), 1);
    assert!(sections[0].content.contains("> ## Quoted"));
}

#[test]
fn test_duplicate_titles_get_unique_ids() {
    let sections = parse_sections("## Setup\na\n## Setup\nb\n## Setup\nc");
    let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();

    assert_eq!(ids, ["setup", "setup-1", "setup-2"]);
}

#[test]
fn test_setext_heading_opens_section() {
    let sections = parse_sections("Title\n-----\nbody\n\n## Next\nx");

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].title, "Title");
    assert_eq!(sections[0].heading_line, 0);
    assert_eq!(sections[0].line_start, 2);
    assert_eq!(sections[0].content, "body\n");
    assert_eq!(sections[1].title, "Next");
}

#[test]
fn test_title_markup_is_stripped() {
    let sections = parse_sections("## **Bold** `code` [link](https://example.com)\nbody");

    assert_eq!(sections[0].title, "Bold code link");
    assert_eq!(sections[0].id, "bold-code-link");
}

#[test]
fn test_closing_hashes_are_not_title() {
    let sections = parse_sections("## Title ##\nbody");
    assert_eq!(sections[0].title, "Title");
}

#[test]
fn test_trailing_newline_stays_in_last_section() {
    let sections = parse_sections("## A\nx\n");
    assert_eq!(sections[0].content, "x\n");
}

#[test]
fn test_sections_tile_the_document() {
    let doc = "intro\n## One\na\nb\n## Two\n\n## Three\nc\n";
    let lines: Vec<&str> = doc.split('\n').collect();
    let sections = parse_sections(doc);

    assert_eq!(sections.len(), 3);
    for pair in sections.windows(2) {
        assert_eq!(pair[0].line_end, pair[1].heading_line);
    }
    assert_eq!(sections[2].line_end, lines.len());
    for section in &sections {
        assert_eq!(
            section.content,
            lines[section.line_start..section.line_end].join("\n")
        );
    }
}

#[test]
fn test_empty_section_body() {
    let sections = parse_sections("## A\n## B\nx");

    assert_eq!(sections[0].content, "");
    assert_eq!(sections[0].line_start, sections[0].line_end);
}

#[test]
fn test_line_fallback_skips_fences() {
    let lines: Vec<&str> = "## A\n~~~\n## no\n~~~\n##not\n   ## B ##\n    ## indented"
        .split('\n')
        .collect();
    let headings = line_headings(&lines);
    let titles: Vec<&str> = headings.iter().map(|h| h.title.as_str()).collect();

    assert_eq!(titles, ["A", "B"]);
    assert_eq!(headings[1].first_line, 5);
}

#[test]
fn test_plain_text() {
    assert_eq!(plain_text("\\*not emphasis\\*"), "*not emphasis*");
    assert_eq!(plain_text("![alt](img.png) text"), "alt text");
    assert_eq!(plain_text("~~gone~~ _kept_"), "gone _kept_");
    assert_eq!(plain_text("[a [nested] link](http://x.y/(z))"), "a nested link");
}
