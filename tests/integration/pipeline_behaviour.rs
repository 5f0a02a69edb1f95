use std::fs;

use anyhow::Result;
use comment_translator::{
    config::TranslationMode,
    pipeline::{run_batch, FileProcessor, ProcessorSettings},
};
use tempfile::tempdir;

use crate::common::{copy_fixture, has_han, FakeBackend};

fn settings(mode: TranslationMode, write_output: bool) -> ProcessorSettings {
    ProcessorSettings {
        mode,
        source_lang: "ZH".into(),
        target_lang: "EN-US".into(),
        write_output,
    }
}

#[test]
fn replace_mode_rewrites_every_han_comment() -> Result<()> {
    let temp = tempdir()?;
    let path = copy_fixture("tests/fixtures/sample.cs", temp.path())?;
    let backend = FakeBackend::default();
    let processor = FileProcessor::new(&backend, settings(TranslationMode::Replace, true));

    let report = processor.process_file(&path)?;
    let rewritten = fs::read_to_string(&path)?;

    assert!(report.written);
    assert!(!has_han(&rewritten), "{rewritten}");
    assert_eq!(report.multiline_count, 2);
    assert_eq!(report.singleline_count, 1);
    assert_eq!(report.doc_block_count, 1);
    assert_eq!(report.total_comments(), 4);
    assert!(report.conflicts.is_empty());
    assert!(rewritten.ends_with("}\n"));
    assert!(rewritten.contains("return id.ToString(); // plain english"));
    assert!(rewritten.contains("/// <param name=\"id\">en(4 chars)</param>"));
    Ok(())
}

#[test]
fn doc_block_with_single_han_line_yields_one_edit() -> Result<()> {
    let backend = FakeBackend::with_entries(&[("\u{83B7}\u{53D6}", "Fetch")]);
    let processor = FileProcessor::new(&backend, settings(TranslationMode::Replace, false));
    let source = "/// <summary>\n/// \u{83B7}\u{53D6}\n/// </summary>\nvoid Fetch();\n";

    let (output, report) = processor.process_text(source);

    assert_eq!(
        output,
        "/// <summary>\n/// Fetch\n/// </summary>\nvoid Fetch();\n"
    );
    assert_eq!(report.doc_block_count, 1);
    assert_eq!(report.lines_touched, 1);
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].translations.len(), 1);
    assert_eq!(report.entries[0].translations[0].line, 2);
    Ok(())
}

#[test]
fn append_mode_without_writing_leaves_file_untouched() -> Result<()> {
    let temp = tempdir()?;
    let path = copy_fixture("tests/fixtures/sample.cs", temp.path())?;
    let before = fs::read_to_string(&path)?;
    let backend = FakeBackend::default();
    let processor = FileProcessor::new(&backend, settings(TranslationMode::Append, false));

    let report = processor.process_file(&path)?;

    assert!(!report.written);
    assert_eq!(fs::read_to_string(&path)?, before);
    assert_eq!(report.mode, TranslationMode::Append);
    let single = report
        .entries
        .iter()
        .find(|entry| entry.kind == "single-line")
        .expect("line comment entry");
    assert_eq!(
        single.translations[0].translated,
        " \u{8BA1}\u{6570}\u{5668} en(3 chars)"
    );
    Ok(())
}

#[test]
fn append_mode_keeps_decorated_block_gutter() -> Result<()> {
    let temp = tempdir()?;
    let path = copy_fixture("tests/fixtures/sample.cs", temp.path())?;
    let backend = FakeBackend::default();
    let processor = FileProcessor::new(&backend, settings(TranslationMode::Append, true));

    let report = processor.process_file(&path)?;
    let rewritten = fs::read_to_string(&path)?;

    assert!(report.written);
    assert!(rewritten.contains(
        "        /*\n         * \u{591A}\u{884C}\u{6CE8}\u{91CA}\n         * \u{7B2C}\u{4E8C}\u{884C}\n         * en(8 chars)\n         */\n        private int count;"
    ));
    assert!(rewritten.contains("    /* \u{7528}\u{6237}\u{670D}\u{52A1} en(4 chars) */"));

    let calls_after_first = backend.calls.borrow().len();
    FileProcessor::new(&backend, settings(TranslationMode::Append, false)).process_file(&path)?;
    assert!(backend.calls.borrow()[calls_after_first..]
        .iter()
        .all(|fragment| !fragment.contains("en(")));
    Ok(())
}

#[test]
fn english_only_file_is_not_rewritten() -> Result<()> {
    let temp = tempdir()?;
    let path = copy_fixture("tests/fixtures/plain.cs", temp.path())?;
    let backend = FakeBackend::default();
    let processor = FileProcessor::new(&backend, settings(TranslationMode::Replace, true));

    let report = processor.process_file(&path)?;

    assert!(!report.written);
    assert_eq!(report.total_comments(), 0);
    assert!(backend.calls.borrow().is_empty());
    Ok(())
}

#[test]
fn batch_continues_past_missing_files() -> Result<()> {
    let temp = tempdir()?;
    let sample = copy_fixture("tests/fixtures/sample.cs", temp.path())?;
    let missing = temp.path().join("Missing.cs");
    let backend = FakeBackend::default();
    let processor = FileProcessor::new(&backend, settings(TranslationMode::Replace, true));

    let mut seen = Vec::new();
    let summary = run_batch(&processor, &[missing, sample.clone()], |report| {
        seen.push(report.path.clone());
    });

    assert_eq!(summary.files_failed, 1);
    assert_eq!(summary.files_processed, 1);
    assert_eq!(summary.files_written, 1);
    assert_eq!(summary.comments, 4);
    assert_eq!(seen, vec![Some(sample)]);
    Ok(())
}
