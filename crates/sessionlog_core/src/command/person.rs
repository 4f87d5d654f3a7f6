//! Commands over person records.

use crate::command::{CommandError, CommandResult};
use crate::model::book::{Model, NameKeywords};
use crate::model::index::Index;
use crate::model::person::Person;

/// Adds a new person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommand {
    person: Person,
}

impl AddCommand {
    pub const WORD: &'static str = "add";
    pub const USAGE: &'static str = "add: Adds a person to the record book.\n\
        Parameters: n/NAME i/IDENTITY_NUMBER p/PHONE e/EMAIL a/ADDRESS\n\
        Example: add n/John Doe i/S1234567A p/98765432 e/johnd@example.com a/311, Clementi Ave 2, #02-25";

    pub fn new(person: Person) -> Self {
        Self { person }
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        model.add_person(self.person.clone())?;
        Ok(CommandResult::new(format!(
            "New person added: {}",
            self.person
        )))
    }
}

/// Deletes the person at a displayed index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCommand {
    index: Index,
}

impl DeleteCommand {
    pub const WORD: &'static str = "delete";
    pub const USAGE: &'static str = "delete: Deletes the person identified by the index number used in the displayed person list.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: delete 1";

    pub fn new(index: Index) -> Self {
        Self { index }
    }

    pub fn index(&self) -> Index {
        self.index
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        let identity_number = model
            .displayed_person(self.index)?
            .identity_number()
            .clone();
        let removed = model.delete_person(&identity_number)?;
        Ok(CommandResult::new(format!("Deleted person: {removed}")))
    }
}

/// Shows every person.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCommand;

impl ListCommand {
    pub const WORD: &'static str = "list";
    pub const USAGE: &'static str = "list: Lists all persons.\nExample: list";

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        model.update_person_filter(None);
        Ok(CommandResult::new(format!(
            "Listed all persons ({})",
            model.displayed_persons().len()
        )))
    }
}

/// Shows persons whose names contain any keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindCommand {
    keywords: NameKeywords,
}

impl FindCommand {
    pub const WORD: &'static str = "find";
    pub const USAGE: &'static str = "find: Finds all persons whose names contain any of the given keywords (case-insensitive).\n\
        Parameters: KEYWORD [MORE_KEYWORDS]...\n\
        Example: find alice bob";

    pub fn new(keywords: NameKeywords) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &NameKeywords {
        &self.keywords
    }

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        model.update_person_filter(Some(self.keywords.clone()));
        Ok(CommandResult::new(format!(
            "{} person(s) listed",
            model.displayed_persons().len()
        )))
    }
}

/// Removes every person.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearCommand;

impl ClearCommand {
    pub const WORD: &'static str = "clear";
    pub const USAGE: &'static str = "clear: Removes every person and their logs.\nExample: clear";

    pub fn execute(&self, model: &mut Model) -> Result<CommandResult, CommandError> {
        model.clear();
        model.update_person_filter(None);
        Ok(CommandResult::new("Record book has been cleared"))
    }
}
