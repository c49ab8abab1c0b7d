//! Verse extraction from Genius lyrics pages.
//!
//! The page markup is reduced to a flat list of trimmed, non-empty lines
//! ([`lyrics_lines`]). Lines wholly wrapped in brackets (`[Chorus]`,
//! `[Verse 2: ...]`) are section markers and never count as lyrics.

use once_cell::sync::Lazy;
use rand::{Rng, seq::IndexedRandom};
use scraper::{ElementRef, Html, Node, Selector};

use crate::{
    error::AppError,
    utils::{is_section_marker, strip_parentheticals, word_count},
};

/// CSS selector matching every lyrics container on a Genius song page.
pub const LYRICS_CONTAINER_SELECTOR: &str = r#"div[class^="Lyrics__Container"]"#;

/// Lines collected per section before filtering.
pub const FIRST_VERSE_SCAN_LIMIT: usize = 8;
/// Minimum number of words for a line to count towards a first verse.
pub const FIRST_VERSE_MIN_WORDS: usize = 4;
/// Qualifying lines required, and returned, for a first verse.
pub const FIRST_VERSE_LINES: usize = 6;
/// Lines per block for random verses.
pub const RANDOM_VERSE_LINES: usize = 4;

static LYRICS_CONTAINER: Lazy<Selector> =
    Lazy::new(|| Selector::parse(LYRICS_CONTAINER_SELECTOR).unwrap());

/// Rendered text of one container: text nodes in document order, `<br>` as a
/// line break.
fn container_text(container: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in container.descendants() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(el) if el.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text
}

/// Text of every lyrics container on the page, in document order.
pub fn container_texts(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&LYRICS_CONTAINER)
        .map(container_text)
        .collect()
}

/// Flattens all lyrics containers into trimmed, non-empty lines.
pub fn lyrics_lines(html: &str) -> Vec<String> {
    container_texts(html)
        .iter()
        .flat_map(|text| text.split('\n'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// First stanza of the page: the leading run of lines up to the first blank
/// line, across all containers joined by newlines.
pub fn first_stanza(html: &str) -> Result<String, AppError> {
    let full = container_texts(html).join("\n");
    let stanza: Vec<&str> = full
        .split('\n')
        .map(str::trim)
        .skip_while(|line| line.is_empty())
        .take_while(|line| !line.is_empty())
        .collect();

    if stanza.is_empty() {
        return Err(AppError::NotFound("no lyrics found on page".to_string()));
    }

    Ok(stanza.join("\n"))
}

/// Finds the first section that opens with a verse of six long lines.
///
/// For each section marker followed by lyrics, up to eight lines are
/// collected (parenthetical asides removed, lines left empty dropped) until
/// the next marker. Lines with at least four words qualify; the first section
/// with six qualifying lines wins and its first six are returned. Sections
/// below the threshold are skipped, never padded.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] when no section qualifies.
pub fn first_verse<S: AsRef<str>>(lines: &[S]) -> Result<String, AppError> {
    for (i, line) in lines.iter().enumerate() {
        if !is_section_marker(line.as_ref()) {
            continue;
        }

        match lines.get(i + 1) {
            Some(next) if !is_section_marker(next.as_ref()) => {}
            _ => continue,
        }

        let mut collected: Vec<String> = Vec::new();
        for candidate in lines[i + 1..].iter().map(AsRef::as_ref) {
            if collected.len() >= FIRST_VERSE_SCAN_LIMIT || is_section_marker(candidate) {
                break;
            }

            let cleaned = strip_parentheticals(candidate);
            if !cleaned.is_empty() {
                collected.push(cleaned);
            }
        }

        let qualifying: Vec<String> = collected
            .into_iter()
            .filter(|l| word_count(l) >= FIRST_VERSE_MIN_WORDS)
            .collect();

        if qualifying.len() >= FIRST_VERSE_LINES {
            return Ok(qualifying[..FIRST_VERSE_LINES].join("\n"));
        }
    }

    Err(AppError::NotFound("could not extract a first verse".to_string()))
}

/// Splits the lyrics into complete four-line blocks.
///
/// The running block is reset at every section marker; a remainder shorter
/// than four lines at the end of a section is discarded.
pub fn verse_blocks<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut block: Vec<&str> = Vec::with_capacity(RANDOM_VERSE_LINES);

    for line in lines.iter().map(AsRef::as_ref) {
        if is_section_marker(line) {
            block.clear();
            continue;
        }

        block.push(line);
        if block.len() == RANDOM_VERSE_LINES {
            blocks.push(block.join("\n"));
            block.clear();
        }
    }

    blocks
}

/// Picks one of the [`verse_blocks`] uniformly at random.
pub fn random_verse<S: AsRef<str>, R: Rng + ?Sized>(
    lines: &[S],
    rng: &mut R,
) -> Result<String, AppError> {
    verse_blocks(lines)
        .choose(rng)
        .cloned()
        .ok_or_else(|| AppError::NotFound("could not find a complete verse".to_string()))
}
