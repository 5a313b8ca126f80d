//! Create/edit form for a person.

use crate::core::date::{format_date, parse_br_date};
use crate::core::query::{person_route, PERSONS_ROUTE};
use crate::domain::model::{Person, PersonPayload};
use crate::utils::error::{AppError, Result};

pub const CREATE_TITLE: &str = "Criar Novo Cadastro";
pub const EDIT_TITLE: &str = "Editar Cadastro";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonForm {
    /// Present when editing an existing record.
    editing: Option<Option<i64>>,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Typed as `DD/MM/YYYY`.
    pub birth_date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(PersonPayload),
    Edit {
        id: Option<i64>,
        payload: PersonPayload,
    },
}

impl Submission {
    pub fn payload(&self) -> &PersonPayload {
        match self {
            Submission::Create(payload) | Submission::Edit { payload, .. } => payload,
        }
    }

    /// Route the submission targets; edits without an id have nowhere to go.
    pub fn route(&self) -> Result<String> {
        match self {
            Submission::Create(_) => Ok(PERSONS_ROUTE.to_string()),
            Submission::Edit { id: Some(id), .. } => Ok(person_route(*id)),
            Submission::Edit { id: None, .. } => Err(AppError::ValidationError {
                message: "Cannot edit a person without an id".to_string(),
            }),
        }
    }
}

impl PersonForm {
    pub fn blank() -> Self {
        Self {
            editing: None,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            birth_date: String::new(),
        }
    }

    /// Prefills the form from a stored record, showing its birth date as `DD/MM/YYYY`.
    pub fn from_person(person: &Person) -> Self {
        Self {
            editing: Some(person.id),
            name: person.name.clone(),
            email: person.email.clone().unwrap_or_default(),
            phone: person.phone.clone(),
            birth_date: format_date(&person.birth_date),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            EDIT_TITLE
        } else {
            CREATE_TITLE
        }
    }

    /// Validates the birth date and builds the request body.
    ///
    /// The birth date is sent as midnight UTC in ISO-8601 with milliseconds.
    pub fn submit(&self) -> Result<Submission> {
        let birth_date = parse_br_date(&self.birth_date).ok_or_else(|| {
            tracing::warn!("Rejected birth date '{}'", self.birth_date);
            AppError::InvalidBirthDate {
                value: self.birth_date.clone(),
            }
        })?;

        let payload = PersonPayload {
            name: self.name.clone(),
            email: Some(self.email.trim())
                .filter(|email| !email.is_empty())
                .map(str::to_string),
            phone: self.phone.clone(),
            birth_date: format!("{}T00:00:00.000Z", birth_date.format("%Y-%m-%d")),
        };

        Ok(match self.editing {
            Some(id) => Submission::Edit { id, payload },
            None => Submission::Create(payload),
        })
    }
}

impl Default for PersonForm {
    fn default() -> Self {
        Self::blank()
    }
}
