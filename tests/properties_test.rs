//! Invariants that hold for every document the paginator lays out.

use docpager::layout::{cost, letter, CapacityBudget, PagePolicy, Paginator};
use docpager::model::{Block, DocumentContent, ImageRef, PaginatedDocument, Signature};
use docpager::{paginate_document, paginate_document_with, DocumentKind, LayoutOptions};

/// Deterministic pseudo-random prose: words of 1-12 letters.
fn prose(seed: u64, words: usize) -> String {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..words)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let len = 1 + (state >> 59) as usize % 12;
            "abcdefghijklmnopqrstuvwxyz"
                .chars()
                .cycle()
                .skip((state >> 40) as usize % 26)
                .take(len)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn sample_letter(seed: u64) -> DocumentContent {
    let body = format!(
        "{}\n\n{}\n{{{{IMG::logo}}}}\n{}\n{}",
        prose(seed, 40),
        prose(seed + 1, 400),
        prose(seed + 2, 15),
        prose(seed + 3, 900)
    );
    let mut content = DocumentContent::letter(body)
        .with_title("Ofício 7/2025")
        .with_addresses("Gabinete do Prefeito", "Secretaria de Obras")
        .with_signature(Signature::new("Maria Souza", "Secretária", "Administração"));
    content.images.push(ImageRef {
        id: "logo".to_string(),
        url: "https://cdn/logo.png".to_string(),
        width: Some(300.0),
    });
    content
}

/// Join fragments of the same paragraph back into whole lines.
fn reconstruct(doc: &PaginatedDocument) -> Vec<String> {
    let mut lines: Vec<(Option<usize>, String)> = Vec::new();
    for block in doc.blocks() {
        match block {
            Block::TextLine(line) => match lines.last_mut() {
                Some((Some(paragraph), text)) if *paragraph == line.paragraph => {
                    text.push(' ');
                    text.push_str(&line.plain_text());
                }
                _ => lines.push((Some(line.paragraph), line.plain_text())),
            },
            other => lines.push((None, format!("{:?}", other))),
        }
    }
    lines.into_iter().map(|(_, text)| text).collect()
}

#[test]
fn test_always_at_least_one_page() {
    for kind in [
        DocumentKind::Letter,
        DocumentKind::PurchaseRequest,
        DocumentKind::PerDiem,
        DocumentKind::Dossier,
    ] {
        let mut content = DocumentContent::new(kind);
        content.body = "   \n  ".to_string();
        let doc = paginate_document(&content).unwrap();
        assert!(doc.page_count() >= 1, "{:?}", kind);
    }
}

#[test]
fn test_capacity_respected() {
    let budget = CapacityBudget::letter();
    let policy = PagePolicy::new().with_address_reserve(true);

    for seed in 0..8 {
        let content = sample_letter(seed);
        let doc = paginate_document(&content).unwrap();
        assert_eq!(doc.stats.overflows, 0);
        assert!(doc.page_count() > 2);

        for page in &doc.pages {
            let used: f32 = page.blocks.iter().map(|b| cost(b, &budget)).sum();
            let limit = policy.page_limit(&budget, page.page_index);
            assert!(
                used <= limit + 1e-3,
                "seed {} page {} uses {} of {}",
                seed,
                page.number,
                used,
                limit
            );
            assert!((used - page.lines_used).abs() < 1e-3);
        }
    }
}

#[test]
fn test_no_block_loss() {
    for seed in 0..8 {
        let content = sample_letter(seed);
        let original: Vec<String> = letter::letter_blocks(&content)
            .iter()
            .map(|block| match block {
                Block::TextLine(line) => line.plain_text(),
                other => format!("{:?}", other),
            })
            .collect();

        let doc = paginate_document(&content).unwrap();
        assert!(doc.stats.splits > 0);
        assert_eq!(reconstruct(&doc), original, "seed {}", seed);
    }
}

#[test]
fn test_split_points_fall_between_words() {
    let content = sample_letter(3);
    let doc = paginate_document(&content).unwrap();
    assert_eq!(doc.stats.hard_cuts, 0);

    for page in &doc.pages {
        for block in &page.blocks {
            if let Some(line) = block.as_text_line() {
                let text = line.plain_text();
                assert!(!text.starts_with(' '), "fragment starts with a space: {:?}", text);
                assert!(!text.ends_with(' '), "fragment ends with a space: {:?}", text);
            }
        }
    }
}

#[test]
fn test_hard_cut_only_without_spaces() {
    let budget = CapacityBudget::new(4.0, 4.0, 30);
    let token = "x".repeat(200);
    let (pages, stats) = Paginator::new(&budget, &PagePolicy::new())
        .paginate_with_stats(vec![Block::text(token.clone())]);
    assert!(stats.hard_cuts > 0);
    let joined: String = pages.iter().map(|p| p.plain_text()).collect();
    assert_eq!(joined, token);
}

#[test]
fn test_idempotent() {
    let content = sample_letter(11);
    let options = LayoutOptions::new();
    let first = paginate_document_with(&content, &options).unwrap();
    let second = paginate_document_with(&content, &options).unwrap();
    assert_eq!(first, second);
}
