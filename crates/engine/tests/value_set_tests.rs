use rubrics_engine::{Document, Element, SelectOption, Surface, ValueSetWidget};
use rubrics_types::{ElementId, ValueMap};

/// Surface that records how often each operation ran.
#[derive(Default)]
struct RecordingSurface {
    document: Document,
    option_rewrites: usize,
}

impl Surface for RecordingSurface {
    fn replace_options(&mut self, id: &ElementId, options: Vec<SelectOption>) {
        self.option_rewrites += 1;
        self.document.replace_options(id, options);
    }

    fn select_option(&mut self, id: &ElementId, value: &str) {
        self.document.select_option(id, value);
    }

    fn set_value(&mut self, id: &ElementId, value: &str) {
        self.document.set_value(id, value);
    }

    fn value(&self, id: &ElementId) -> Option<&str> {
        self.document.value(id)
    }

    fn focus(&mut self, id: &ElementId) {
        self.document.focus(id);
    }

    fn open_dialog(&mut self, id: &ElementId) {
        self.document.open_dialog(id);
    }

    fn close_dialog(&mut self, id: &ElementId) {
        self.document.close_dialog(id);
    }
}

fn select_id() -> ElementId {
    ElementId::new("rubric-1-select")
}

fn hidden_id() -> ElementId {
    ElementId::new("rubric-1-hidden")
}

fn widget_on_document() -> (Document, ValueSetWidget) {
    let mut document = Document::new();
    document.insert(select_id(), Element::select()).expect("select");
    document.insert(hidden_id(), Element::hidden("")).expect("hidden");
    (document, ValueSetWidget::new(select_id(), Some(hidden_id())))
}

#[test]
fn put_twice_keeps_last_score() {
    let (mut document, mut widget) = widget_on_document();
    widget.put(&mut document, "n", "1");
    widget.put(&mut document, "n", "2");

    assert_eq!(widget.get("n").map(|score| score.as_str()), Some("2"));
    assert_eq!(widget.value_map().len(), 1);
    assert_eq!(document.options(&select_id()).len(), 1);
    assert_eq!(document.options(&select_id())[0].label, "n [2]");
}

#[test]
fn remove_is_idempotent() {
    let (mut document, mut widget) = widget_on_document();
    widget.put(&mut document, "a", "1");
    widget.put(&mut document, "b", "2");

    widget.remove(&mut document, "a");
    let once = widget.value_map().clone();
    widget.remove(&mut document, "a");

    assert_eq!(widget.value_map(), &once);
    assert_eq!(document.value(&hidden_id()), Some("b:2"));
    widget.remove(&mut document, "missing");
    assert_eq!(widget.value_map().len(), 1);
}

#[test]
fn clear_leaves_no_entries_or_options() {
    let (mut document, mut widget) = widget_on_document();
    widget.put(&mut document, "a", "1");
    widget.put(&mut document, "b", "2");

    widget.clear(&mut document);

    assert!(widget.value_map().is_empty());
    assert!(document.options(&select_id()).is_empty());
    assert_eq!(document.value(&hidden_id()), Some(""));
    assert_eq!(document.value(&select_id()), None);
}

#[test]
fn set_values_replaces_previous_entries() {
    let (mut document, mut widget) = widget_on_document();
    widget.put(&mut document, "stale", "9");

    let replacement: ValueMap = [("fresh", "1"), ("newer", "2")].into_iter().collect();
    widget.set_values(&mut document, &replacement);

    assert_eq!(widget.value_map(), &replacement);
    assert!(widget.get("stale").is_none());
    let labels: Vec<&str> = document
        .options(&select_id())
        .iter()
        .map(|option| option.label.as_str())
        .collect();
    assert_eq!(labels, vec!["fresh [1]", "newer [2]"]);
}

#[test]
fn set_values_copies_rather_than_aliases() {
    let (mut document, mut widget) = widget_on_document();
    let mut source: ValueMap = [("x", "5")].into_iter().collect();
    widget.set_values(&mut document, &source);

    source.insert("y", "7");
    assert_eq!(widget.value_map().len(), 1);
}

#[test]
fn set_values_redraws_once() {
    let mut surface = RecordingSurface::default();
    surface.document.insert(select_id(), Element::select()).expect("select");
    let mut widget = ValueSetWidget::new(select_id(), None);

    let values: ValueMap = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
    widget.set_values(&mut surface, &values);

    assert_eq!(surface.option_rewrites, 1);
    assert_eq!(surface.document.options(&select_id()).len(), 3);
}

#[test]
fn serialized_form_has_one_token_per_entry() {
    let (mut document, mut widget) = widget_on_document();
    widget.put(&mut document, "a", 1_i64);
    widget.put(&mut document, "b", 2_i64);

    let serialized = widget.serialized_form();
    let mut tokens: Vec<&str> = serialized.split(',').collect();
    tokens.sort_unstable();
    assert_eq!(tokens, vec!["a:1", "b:2"]);
    assert_eq!(document.value(&hidden_id()), Some(serialized.as_str()));
}

#[test]
fn serialized_form_reads_back() {
    let (mut document, mut widget) = widget_on_document();
    widget.put(&mut document, "poor", "0");
    widget.put(&mut document, "fair", "1.5");

    let parsed = ValueMap::parse_serialized(&widget.serialized_form()).expect("parse");
    assert_eq!(&parsed, widget.value_map());
}

#[test]
fn empty_map_serializes_to_empty_string() {
    let (_, widget) = widget_on_document();
    assert_eq!(widget.serialized_form(), "");
}
