//! Projection of [`ViewState`] into what the page renders.

use shared::domain::BookRecord;

use crate::{
    form::FormField,
    state::{StatusKind, ViewState},
};

pub const EMPTY_TABLE_TEXT: &str = "No books available";

pub const TABLE_HEADERS: [&str; 7] = [
    "ID",
    "Title",
    "Author",
    "Publisher",
    "Year",
    "Genre",
    "Actions",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub banner: Option<Banner>,
    pub form: FormView,
    pub search: Option<SearchPanel>,
    pub table: TableView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: StatusKind,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: FormField,
    pub placeholder: &'static str,
    pub value: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitButton {
    Add,
    Update,
}

impl SubmitButton {
    pub fn label(self) -> &'static str {
        match self {
            SubmitButton::Add => "Add Book",
            SubmitButton::Update => "Update Book",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub submit: SubmitButton,
    pub show_cancel: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPanel {
    /// Id of the record shown, which may differ from the live search input.
    pub search_id: String,
    pub lines: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub record: BookRecord,
    pub cells: [String; 6],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    Empty { text: &'static str },
    Rows(Vec<RowView>),
}

pub fn project(state: &ViewState) -> ViewModel {
    ViewModel {
        banner: state.status.map(|message| Banner {
            kind: message.kind(),
            text: message.text(),
        }),
        form: project_form(state),
        search: state.search_result.as_ref().map(|record| SearchPanel {
            search_id: record.id.clone(),
            lines: vec![
                ("ID", record.id.clone()),
                ("Title", record.title.clone()),
                ("Author", record.author.clone()),
                ("Publisher", record.publisher.clone()),
                ("Year", record.year.to_string()),
                ("Genre", record.genre.clone()),
            ],
        }),
        table: project_table(&state.records),
    }
}

fn project_form(state: &ViewState) -> FormView {
    let form = &state.form;
    let editing = form.is_editing();
    FormView {
        fields: FormField::ALL
            .iter()
            .map(|&field| FieldView {
                field,
                placeholder: field.placeholder(),
                value: form.draft().get(field).to_string(),
                enabled: form.is_field_enabled(field),
            })
            .collect(),
        submit: if editing {
            SubmitButton::Update
        } else {
            SubmitButton::Add
        },
        show_cancel: editing,
    }
}

fn project_table(records: &[BookRecord]) -> TableView {
    if records.is_empty() {
        return TableView::Empty {
            text: EMPTY_TABLE_TEXT,
        };
    }
    TableView::Rows(
        records
            .iter()
            .map(|record| RowView {
                cells: [
                    record.id.clone(),
                    record.title.clone(),
                    record.author.clone(),
                    record.publisher.clone(),
                    record.year.to_string(),
                    record.genre.clone(),
                ],
                record: record.clone(),
            })
            .collect(),
    )
}
