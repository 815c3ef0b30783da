//! Integration tests for letter pagination and content loading.

use std::io::Write;

use docpager::layout::{CapacityBudget, PagePolicy, Paginator};
use docpager::model::{Block, LinePart};
use docpager::{
    load_file, paginate_document, paginate_document_with, BudgetTable, DocumentContent,
    DocumentKind, Docpager, JsonFormat, LayoutOptions, Signature,
};
use tempfile::NamedTempFile;

fn words(count: usize) -> String {
    (0..count)
        .map(|i| format!("termo{}", i % 10))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_short_paragraphs_single_page() {
    let content = DocumentContent::letter("Prezados senhores,\nInformamos o recebimento.\nAtenciosamente,");
    let doc = paginate_document(&content).unwrap();

    assert_eq!(doc.page_count(), 1);
    assert_eq!(doc.pages[0].block_count(), 3);
    assert!(doc.pages[0].blocks.iter().all(Block::is_text));
    assert!((doc.pages[0].lines_used - 6.6).abs() < 1e-4);
    assert_eq!(doc.stats.splits, 0);
}

#[test]
fn test_long_paragraph_with_three_lines_left() {
    // 500 characters at 90 per line with only 3 lines of room
    let text = words(500 / 6 + 1)[..500].trim_end().to_string();
    let budget = CapacityBudget::new(3.0, 24.0, 90);
    let pages = Paginator::new(&budget, &PagePolicy::new()).paginate(vec![Block::text(text.clone())]);

    assert_eq!(pages.len(), 2);
    let head = pages[0].blocks[0].as_text_line().unwrap();
    let tail = pages[1].blocks[0].as_text_line().unwrap();

    assert!(head.char_count() <= 270);
    assert!(head.char_count() > 250);
    assert_eq!(head.part, LinePart::Fragment);
    assert_eq!(tail.part, LinePart::Fragment);
    assert_eq!(format!("{} {}", head.plain_text(), tail.plain_text()), text);
    assert!(pages[1].lines_used <= 24.0);
}

#[test]
fn test_signature_stays_whole() {
    // Fill the first page so the stamp no longer fits under the text
    let body = (0..7).map(|i| format!("Parágrafo {}", i)).collect::<Vec<_>>().join("\n");
    let content = DocumentContent::letter(body)
        .with_addresses("Gabinete", "Câmara Municipal")
        .with_signature(Signature::new("João", "", "Gabinete"));
    let doc = paginate_document(&content).unwrap();

    assert_eq!(doc.page_count(), 2);
    let stamp = &doc.pages[1].blocks[0];
    assert!(stamp.is_signature());
    assert_eq!(stamp.plain_text(), "João\n---\nGabinete");
}

#[test]
fn test_image_moves_whole_to_next_page() {
    let body = format!("{}\n{{{{IMG::mapa}}}}", words(200));
    let content = DocumentContent::letter(body);
    let doc = paginate_document(&content).unwrap();

    let image_page = doc
        .pages
        .iter()
        .find(|p| p.blocks.iter().any(Block::is_image))
        .unwrap();
    assert_eq!(image_page.number, 1);
    assert!(image_page.blocks[0].is_image());
}

#[test]
fn test_load_file_and_paginate() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "kind": "letter",
            "title": "Ofício 12/2025",
            "body": "Prezados,\n<b>Urgente:</b> segue o relatório.",
            "left_address": "Secretaria de Saúde",
            "show_address_blocks": true,
            "signature": {{"name": "Ana Lima", "role": "Secretária", "sector": "Saúde"}},
            "protocol": "2025/0042"
        }}"#
    )
    .unwrap();

    let content = load_file(file.path()).unwrap();
    assert_eq!(content.kind, DocumentKind::Letter);
    assert!(content.reserves_address_blocks());

    let doc = paginate_document(&content).unwrap();
    assert_eq!(doc.page_count(), 1);
    let line = doc.pages[0].blocks[1].as_text_line().unwrap();
    assert!(line.runs[0].style.bold);
    assert!(doc.pages[0].blocks[2].is_signature());
}

#[test]
fn test_budget_file_overrides_letter() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"letter": {{"total_lines": 12, "security_margin_lines": 0,
            "first_page_limit": 5, "normal_page_limit": 5, "chars_per_line": 40}}}}"#
    )
    .unwrap();

    let budgets = BudgetTable::load(file.path()).unwrap();
    assert_eq!(budgets.dossier, CapacityBudget::dossier());

    let content = DocumentContent::letter("um\ndois\ntrês\nquatro");
    let doc = paginate_document_with(&content, &LayoutOptions::new().with_budgets(budgets)).unwrap();
    assert_eq!(doc.page_count(), 2);

    let result = Docpager::new()
        .with_budget_file(file.path())
        .unwrap()
        .paginate(content)
        .unwrap();
    assert_eq!(result.document().page_count(), 2);
    assert!(result.to_json(JsonFormat::Pretty).unwrap().contains("\"lines_used\""));
}

#[test]
fn test_invalid_budget_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"letter": {{"chars_per_line": "wide"}}}}"#).unwrap();
    assert!(BudgetTable::load(file.path()).is_err());
}
