mod common;

use common::fixtures::{header_record, schedule_records};
use common::TestResult;
use echeancier::{
    AppConfig, JsonFileFeed, NdjsonFeed, RecordAdapter, RecordBatch, RecordFeed, ScheduleState, Session, SessionCommand,
    TableEntry, VecFeed,
};
use serde_json::{json, Map, Value};
use std::io::Write;
use tokio::sync::mpsc;

fn apply_all(batches: Vec<RecordBatch>) -> ScheduleState {
    let adapter = RecordAdapter::default();
    let mut state = ScheduleState::new();
    for batch in &batches {
        if let Some(update) = adapter.adapt(batch) {
            state.apply(update);
        }
    }
    state
}

#[test]
fn test_header_example_renders_like_the_widget() {
    let state = apply_all(vec![RecordBatch::new(
        "PARAMÈTRES",
        vec![json!({"Montant": 100000, "TauxAnnuel": 0.035, "Mensualité": null, "Duree_Mois": 120})],
    )]);
    let view = state.render(&AppConfig::default().messages);

    assert_eq!(view.header.principal, "100 000,00 €");
    assert_eq!(view.header.annual_rate, "3.500 %");
    assert_eq!(view.header.monthly_payment, "—");
    assert_eq!(view.header.duration_months, "120");
    assert_eq!(view.header.total_interest, "—");
}

#[test]
fn test_decomposed_duration_key_is_recognised() {
    let mut record = Map::new();
    record.insert("Dure\u{301}e_Mois".to_string(), Value::from("240"));
    let state = apply_all(vec![RecordBatch::new("PARAMÈTRES", vec![Value::Object(record)])]);
    assert_eq!(state.render(&AppConfig::default().messages).header.duration_months, "240");
}

#[test]
fn test_zero_is_hidden_in_header_but_shown_in_rows() {
    let state = apply_all(vec![
        RecordBatch::new("PARAMÈTRES", vec![json!({"Montant": 0, "TauxAnnuel": 0})]),
        RecordBatch::new("ECHÉANCIER", vec![json!({"Numero": 1, "MontantFrais": 0, "Interets": null})]),
    ]);
    let view = state.render(&AppConfig::default().messages);

    assert_eq!(view.header.principal, "—");
    assert_eq!(view.header.annual_rate, "—");
    let row = view.rows().next().unwrap();
    assert_eq!(row.cells[4], "0,00 €");
    assert_eq!(row.cells[3], "");
}

#[test]
fn test_empty_schedule_batch_clears_rows() {
    let state = apply_all(vec![
        RecordBatch::new("ECHÉANCIER", schedule_records(5)),
        RecordBatch::new("ECHÉANCIER", vec![]),
    ]);
    let view = state.render(&AppConfig::default().messages);
    assert_eq!(
        view.table,
        vec![TableEntry::Placeholder { message: "Aucune ligne".to_string(), span: 8 }]
    );
}

#[test]
fn test_empty_header_batch_keeps_previous_header() {
    let state = apply_all(vec![
        RecordBatch::new("PARAMÈTRES", vec![header_record()]),
        RecordBatch::new("PARAMÈTRES", vec![]),
    ]);
    assert_eq!(state.header().and_then(|h| h.principal), Some(100000.0));
}

#[tokio::test]
async fn test_json_file_round_trip_through_the_view() -> TestResult {
    let mut file = tempfile::NamedTempFile::new()?;
    let document = json!({
        "PARAMÈTRES": [header_record()],
        "ECHÉANCIER": schedule_records(2)
    });
    write!(file, "{}", document)?;

    let adapter = RecordAdapter::default();
    let mut feed = JsonFileFeed::open(file.path()).await?;
    let mut state = ScheduleState::new();
    while let Some(batch) = feed.next_batch().await {
        if let Some(update) = adapter.adapt(&batch) {
            state.apply(update);
        }
    }

    let view = state.render(&AppConfig::default().messages);
    let json = serde_json::to_value(&view)?;
    assert_eq!(json["header"]["principal"], "100 000,00 €");
    assert_eq!(json["table"][0]["kind"], "row");
    assert_eq!(json["table"][1]["cells"][1], "05/02/2024");
    Ok(())
}

#[tokio::test]
async fn test_refresh_republishes_current_view() -> TestResult {
    let session = Session::new(echeancier::LopdfConverter::new(), AppConfig::default());
    let mut view = session.subscribe_view();
    let (commands, receiver) = mpsc::channel(4);
    let running = tokio::spawn(session.run(VecFeed::empty(), receiver));

    commands.send(SessionCommand::Refresh).await?;
    view.changed().await?;
    assert_eq!(view.borrow_and_update().rows().count(), 0);

    drop(commands);
    let outcome = running.await?;
    assert!(outcome.exports.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_ndjson_session_ends_with_its_input() -> TestResult {
    let input = [
        json!({"table": "ECHÉANCIER", "records": schedule_records(1)}).to_string(),
        json!({"command": "refresh"}).to_string(),
        json!({"table": "ECHÉANCIER", "records": schedule_records(4)}).to_string(),
    ]
    .join("\n");

    let session = Session::new(echeancier::LopdfConverter::new(), AppConfig::default());
    let (commands, receiver) = mpsc::channel::<SessionCommand>(4);
    let feed = NdjsonFeed::with_commands(input.as_bytes(), commands);
    let outcome = session.run(feed, receiver).await;

    // The command sender is released at end of input, which ends the session.
    assert_eq!(outcome.state.rows().len(), 4);
    Ok(())
}
