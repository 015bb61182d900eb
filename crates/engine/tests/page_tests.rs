use rubrics_engine::{PageConfig, RubricPage, Surface};
use rubrics_types::{ElementId, Msg, Ordinal, Presentation, RubricDefinitionFile, ValueMap};

fn page() -> RubricPage {
    RubricPage::new(PageConfig::default()).expect("page")
}

fn id(value: &str) -> ElementId {
    ElementId::new(value)
}

#[test]
fn ordinals_increase_across_kinds() {
    let mut page = page();
    page.click(&id("add-dropdown"));
    page.click(&id("add-numeric"));
    page.click(&id("add-dropdown"));

    let ordinals: Vec<u32> = page.manager().rows().iter().map(|row| row.ordinal.get()).collect();
    assert_eq!(ordinals, vec![1, 2, 3]);

    let bound: Vec<(u32, String, Option<String>)> = page
        .manager()
        .widgets()
        .map(|(ordinal, widget)| {
            let widget = widget.borrow();
            (
                ordinal.get(),
                widget.display().to_string(),
                widget.serialization().map(ToString::to_string),
            )
        })
        .collect();
    assert_eq!(
        bound,
        vec![
            (1, "rubric-1-select".to_string(), Some("rubric-1-hidden".to_string())),
            (3, "rubric-3-select".to_string(), Some("rubric-3-hidden".to_string())),
        ]
    );
    assert!(page.manager().widget(Ordinal::new(2).expect("ordinal")).is_none());
}

#[test]
fn rows_render_in_append_order() {
    let mut page = page();
    page.dispatch(Msg::AddRubric(Presentation::Checkbox));
    page.dispatch(Msg::AddRubric(Presentation::Numeric));

    let table = page.config().table.clone();
    let rows = page.document().table_rows(&table);
    assert_eq!(rows, &[id("rubric-1"), id("rubric-2")]);
    assert_eq!(page.manager().rows()[0].header, "Checkbox");
    assert_eq!(page.manager().rows()[1].header, "Numeric");
}

#[test]
fn snapshot_collects_row_fields() {
    let mut page = page();
    page.dispatch(Msg::AddRubric(Presentation::Numeric));
    page.set_field(&id("rubric-1-name"), "Accuracy");
    page.set_field(&id("rubric-1-max-score"), "10");

    let snapshot = page.form_snapshot();
    assert_eq!(snapshot.get(&id("rubric-1-name")), Some("Accuracy"));
    assert_eq!(snapshot.get(&id("rubric-1-max-score")), Some("10"));
    assert_eq!(snapshot.get(&id("rubric-1-presentation")), Some("NUMERIC"));
    assert_eq!(snapshot.get(&id("dropdown-dialog-value-input")), None);
}

#[test]
fn definitions_seed_rows() {
    let yaml = r#"
rubrics:
  - presentation: DROPDOWN
    name: Clarity
    values:
      unclear: 0
      clear: 2
  - presentation: NUMERIC
    name: Accuracy
    max_score: 10
  - presentation: CHECKBOX
    name: Cited sources
    score: 1
"#;
    let file = RubricDefinitionFile::from_yaml_str(yaml).expect("definitions");
    let mut page = page();

    let ordinals = page.load_definitions(&file).expect("load");
    assert_eq!(ordinals.len(), 3);

    let document = page.document();
    assert_eq!(document.value(&id("rubric-1-name")), Some("Clarity"));
    assert_eq!(document.value(&id("rubric-1-hidden")), Some("unclear:0,clear:2"));
    assert_eq!(document.value(&id("rubric-2-max-score")), Some("10"));
    assert_eq!(document.value(&id("rubric-3-score")), Some("1"));
    assert_eq!(document.options(&id("rubric-1-select"))[1].label, "clear [2]");
}

#[test]
fn loaded_rows_continue_numbering() {
    let file = RubricDefinitionFile::from_json_str(r#"{"rubrics":[{"presentation":"NUMERIC"}]}"#)
        .expect("definitions");
    let mut page = page();
    page.load_definitions(&file).expect("load");

    page.dispatch(Msg::AddRubric(Presentation::Dropdown));
    assert_eq!(page.manager().rows()[1].ordinal.get(), 2);
}

#[test]
fn snapshot_serializes_as_flat_json() {
    let mut page = page();
    page.dispatch(Msg::AddRubric(Presentation::Checkbox));
    page.set_field(&id("rubric-1-score"), "1");

    let json = page.form_snapshot().to_json_pretty().expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
    assert_eq!(value["rubric-1-score"], "1");
    assert_eq!(value["rubric-1-presentation"], "CHECKBOX");
}

#[test]
fn snapshot_hidden_field_reads_back_as_widget_values() {
    let yaml = r#"
rubrics:
  - presentation: DROPDOWN
    values:
      full: 10.0
      half: "5:10"
"#;
    let file = RubricDefinitionFile::from_yaml_str(yaml).expect("definitions");
    let mut page = page();
    let ordinals = page.load_definitions(&file).expect("load");

    let snapshot = page.form_snapshot();
    let hidden = snapshot.get(&id("rubric-1-hidden")).expect("hidden field");
    let parsed = ValueMap::parse_serialized(hidden).expect("parse");

    let widget = page.manager().widget(ordinals[0]).expect("widget").borrow();
    assert_eq!(&parsed, widget.value_map());
    assert_eq!(parsed.serialized_form(), "full:10.0,half:5:10");
}
