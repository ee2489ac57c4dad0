//! The shared add/edit form and its mode flag.

use shared::domain::BookRecord;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Id,
    Title,
    Author,
    Publisher,
    Year,
    Genre,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Id,
        FormField::Title,
        FormField::Author,
        FormField::Publisher,
        FormField::Year,
        FormField::Genre,
    ];

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Id => "ID",
            FormField::Title => "Title",
            FormField::Author => "Author",
            FormField::Publisher => "Publisher",
            FormField::Year => "Year",
            FormField::Genre => "Genre",
        }
    }
}

/// Text buffer mirroring [`BookRecord`]; `year` stays text until submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub id: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: String,
    pub genre: String,
}

impl BookDraft {
    pub fn from_record(record: &BookRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            author: record.author.clone(),
            publisher: record.publisher.clone(),
            year: record.year.to_string(),
            genre: record.genre.clone(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Id => &self.id,
            FormField::Title => &self.title,
            FormField::Author => &self.author,
            FormField::Publisher => &self.publisher,
            FormField::Year => &self.year,
            FormField::Genre => &self.genre,
        }
    }

    fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Id => &mut self.id,
            FormField::Title => &mut self.title,
            FormField::Author => &mut self.author,
            FormField::Publisher => &mut self.publisher,
            FormField::Year => &mut self.year,
            FormField::Genre => &mut self.genre,
        }
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    /// Wire form of the draft, with `year` coerced by [`coerce_year`].
    pub fn to_record(&self) -> BookRecord {
        BookRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            publisher: self.publisher.clone(),
            year: coerce_year(&self.year),
            genre: self.genre.clone(),
        }
    }
}

/// Trimmed decimal text to `i32`; anything else (including empty) becomes `0`.
pub fn coerce_year(text: &str) -> i32 {
    text.trim().parse::<i32>().unwrap_or(0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Creating,
    Editing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    draft: BookDraft,
    mode: FormMode,
}

impl FormState {
    pub fn draft(&self) -> &BookDraft {
        &self.draft
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == FormMode::Editing
    }

    pub fn is_field_enabled(&self, field: FormField) -> bool {
        !(field == FormField::Id && self.is_editing())
    }

    /// Replaces one field. Returns `false` (and changes nothing) for the id
    /// field while editing.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> bool {
        if !self.is_field_enabled(field) {
            return false;
        }
        *self.draft.slot_mut(field) = value.into();
        true
    }

    pub fn begin_edit(&mut self, record: &BookRecord) {
        self.draft = BookDraft::from_record(record);
        self.mode = FormMode::Editing;
    }

    /// Back to an empty create form.
    pub fn reset(&mut self) {
        self.draft = BookDraft::default();
        self.mode = FormMode::Creating;
    }

    pub fn validate_for_create(&self) -> Result<(), ValidationError> {
        if self.draft.id.is_empty() {
            return Err(ValidationError::MissingId);
        }
        if self.draft.title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        Ok(())
    }
}
