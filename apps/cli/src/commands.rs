//! Subcommands and their execution against a `ContactStore`.

use std::io::{BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand};
use client_core::sections::{build_sections, initials};
use client_core::{ContactForm, ContactStore};
use shared::domain::{Contact, ContactId};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every contact grouped by first letter.
    List,
    /// Create a contact.
    Add(AddArgs),
    /// Change fields of an existing contact.
    Edit(EditArgs),
    /// Remove a contact.
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub first: String,
    #[arg(long, default_value = "")]
    pub last: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: String,
    #[arg(long)]
    pub first: Option<String>,
    #[arg(long)]
    pub last: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long, conflicts_with = "clear_email")]
    pub email: Option<String>,
    #[arg(long)]
    pub clear_email: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub id: String,
    /// Skip the confirmation prompt.
    #[arg(long)]
    pub yes: bool,
}

pub async fn run(
    store: &dyn ContactStore,
    command: Command,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::List => {
            let contacts = store.list().await.context("failed to load contacts")?;
            out.write_all(render_sections(&contacts).as_bytes())?;
        }
        Command::Add(args) => {
            let contact = new_contact_form(&args)
                .submit()
                .context("contact is incomplete")?;
            let created = store
                .create(&contact)
                .await
                .context("failed to add contact")?;
            writeln!(out, "Added {}", describe(&created))?;
        }
        Command::Edit(args) => {
            let existing = find_contact(store, &args.id).await?;
            let mut form = ContactForm::for_contact(&existing);
            apply_edits(&mut form, &args);
            let contact = form.submit().context("contact is incomplete")?;
            let updated = store
                .update(&contact)
                .await
                .context("failed to update contact")?;
            writeln!(out, "Updated {}", describe(&updated))?;
        }
        Command::Delete(args) => {
            let existing = find_contact(store, &args.id).await?;
            if !args.yes && !confirm_delete(&existing, input, out)? {
                writeln!(out, "Cancelled.")?;
                return Ok(());
            }
            store
                .delete(&existing.id)
                .await
                .context("failed to delete contact")?;
            writeln!(out, "Deleted {}", existing.name)?;
        }
    }
    Ok(())
}

async fn find_contact(store: &dyn ContactStore, id: &str) -> Result<Contact> {
    let id = ContactId::new(id);
    let contacts = store.list().await.context("failed to load contacts")?;
    contacts
        .into_iter()
        .find(|contact| contact.id == id)
        .ok_or_else(|| anyhow!("no contact with id {id}"))
}

fn new_contact_form(args: &AddArgs) -> ContactForm {
    let mut form = ContactForm::new();
    form.first_name = args.first.clone();
    form.last_name = args.last.clone();
    if let Some(id) = form.add_phone_field() {
        form.update_phone_field(id, args.phone.clone());
    }
    if let Some(email) = &args.email {
        if let Some(id) = form.add_email_field() {
            form.update_email_field(id, email.clone());
        }
    }
    form
}

fn apply_edits(form: &mut ContactForm, args: &EditArgs) {
    if let Some(first) = &args.first {
        form.first_name = first.clone();
    }
    if let Some(last) = &args.last {
        form.last_name = last.clone();
    }
    if let Some(phone) = &args.phone {
        let id = match form.phone_fields().first() {
            Some(entry) => Some(entry.id),
            None => form.add_phone_field(),
        };
        if let Some(id) = id {
            form.update_phone_field(id, phone.clone());
        }
    }
    if args.clear_email {
        let ids: Vec<_> = form.email_fields().iter().map(|entry| entry.id).collect();
        for id in ids {
            form.remove_email_field(id);
        }
    } else if let Some(email) = &args.email {
        let id = match form.email_fields().first() {
            Some(entry) => Some(entry.id),
            None => form.add_email_field(),
        };
        if let Some(id) = id {
            form.update_email_field(id, email.clone());
        }
    }
}

fn confirm_delete(contact: &Contact, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(out, "Are you sure you want to delete {}? [y/N] ", contact.name)?;
    out.flush()?;
    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        bail!("no confirmation received; pass --yes to delete without prompting");
    }
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn describe(contact: &Contact) -> String {
    let mut line = format!("{} ({}) {}", contact.name, contact.id, contact.phone);
    if let Some(email) = contact.email.as_deref().filter(|email| !email.is_empty()) {
        line.push_str("  ");
        line.push_str(email);
    }
    line
}

fn render_sections(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return "No contacts yet.\n".to_string();
    }
    let mut rendered = String::new();
    for section in build_sections(contacts) {
        rendered.push_str(&section.title);
        rendered.push('\n');
        for contact in &section.contacts {
            rendered.push_str(&format!("  [{:<2}] {}\n", initials(&contact.name), describe(contact)));
        }
    }
    rendered
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use async_trait::async_trait;
    use client_core::form::ValidationError;
    use client_core::store::StatusCode;
    use client_core::StoreError;
    use tokio::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct FakeStore {
        contacts: Mutex<Vec<Contact>>,
        deleted: Mutex<Vec<ContactId>>,
    }

    impl FakeStore {
        fn with(contacts: Vec<Contact>) -> Self {
            Self {
                contacts: Mutex::new(contacts),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl ContactStore for FakeStore {
        async fn list(&self) -> Result<Vec<Contact>, StoreError> {
            Ok(self.contacts.lock().await.clone())
        }

        async fn create(&self, contact: &Contact) -> Result<Contact, StoreError> {
            self.contacts.lock().await.push(contact.clone());
            Ok(contact.clone())
        }

        async fn update(&self, contact: &Contact) -> Result<Contact, StoreError> {
            let mut contacts = self.contacts.lock().await;
            let slot = contacts
                .iter_mut()
                .find(|existing| existing.id == contact.id)
                .ok_or(StoreError::Server {
                    status: StatusCode::NOT_FOUND,
                })?;
            *slot = contact.clone();
            Ok(contact.clone())
        }

        async fn delete(&self, id: &ContactId) -> Result<(), StoreError> {
            self.contacts.lock().await.retain(|contact| &contact.id != id);
            self.deleted.lock().await.push(id.clone());
            Ok(())
        }
    }

    fn jane() -> Contact {
        Contact::new("1", "Jane Doe", "123").with_email("jane@example.com")
    }

    async fn run_with_input(store: &FakeStore, command: Command, input: &str) -> Result<String> {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        run(store, command, &mut input, &mut out).await?;
        Ok(String::from_utf8(out).expect("utf-8 output"))
    }

    fn edit_args(id: &str) -> EditArgs {
        EditArgs {
            id: id.to_string(),
            first: None,
            last: None,
            phone: None,
            email: None,
            clear_email: false,
        }
    }

    #[test]
    fn add_arguments_fill_the_form() {
        let args = AddArgs {
            first: "Bob".to_string(),
            last: "Lee".to_string(),
            phone: "555".to_string(),
            email: None,
        };

        let contact = new_contact_form(&args).submit().expect("valid");

        assert_eq!(contact.name, "Bob Lee");
        assert_eq!(contact.phone, "555");
        assert_eq!(contact.email, None);
    }

    #[test]
    fn blank_phone_is_rejected_before_any_request() {
        let args = AddArgs {
            first: "Bob".to_string(),
            last: String::new(),
            phone: "   ".to_string(),
            email: None,
        };

        assert_eq!(
            new_contact_form(&args).submit(),
            Err(ValidationError::PhoneRequired)
        );
    }

    #[test]
    fn edits_override_only_given_fields() {
        let mut form = ContactForm::for_contact(&jane());
        let args = EditArgs {
            phone: Some("999".to_string()),
            clear_email: true,
            ..edit_args("1")
        };

        apply_edits(&mut form, &args);
        let contact = form.submit().expect("valid");

        assert_eq!(contact.id, ContactId::new("1"));
        assert_eq!(contact.name, "Jane Doe");
        assert_eq!(contact.phone, "999");
        assert_eq!(contact.email, None);
    }

    #[test]
    fn list_output_is_sectioned() {
        let rendered = render_sections(&[
            Contact::new("2", "Bob Lee", "555"),
            jane(),
            Contact::new("3", "Ann Ray", "777"),
        ]);

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "A");
        assert!(lines[1].contains("[AR] Ann Ray (3) 777"));
        assert_eq!(lines[2], "B");
        assert_eq!(lines[4], "J");
        assert!(lines[5].ends_with("jane@example.com"));
    }

    #[tokio::test]
    async fn add_creates_through_the_store() {
        let store = FakeStore::default();
        let command = Command::Add(AddArgs {
            first: "Bob".to_string(),
            last: "Lee".to_string(),
            phone: "555".to_string(),
            email: None,
        });

        let output = run_with_input(&store, command, "").await.expect("added");

        let contacts = store.contacts.lock().await;
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Bob Lee");
        assert!(output.starts_with("Added Bob Lee"));
    }

    #[tokio::test]
    async fn edit_of_unknown_id_fails_without_update() {
        let store = FakeStore::with(vec![jane()]);

        let err = run_with_input(&store, Command::Edit(edit_args("42")), "")
            .await
            .expect_err("unknown id");

        assert!(err.to_string().contains("42"));
        assert_eq!(*store.contacts.lock().await, vec![jane()]);
    }

    #[tokio::test]
    async fn delete_asks_before_removing() {
        let store = FakeStore::with(vec![jane()]);
        let command = Command::Delete(DeleteArgs {
            id: "1".to_string(),
            yes: false,
        });

        let output = run_with_input(&store, command, "n\n").await.expect("ran");

        assert!(output.contains("Cancelled."));
        assert!(store.deleted.lock().await.is_empty());

        let command = Command::Delete(DeleteArgs {
            id: "1".to_string(),
            yes: false,
        });
        run_with_input(&store, command, "Yes\n").await.expect("ran");

        assert_eq!(*store.deleted.lock().await, vec![ContactId::new("1")]);
        assert!(store.contacts.lock().await.is_empty());
    }

    #[tokio::test]
    async fn delete_with_yes_skips_the_prompt() {
        let store = FakeStore::with(vec![jane()]);
        let command = Command::Delete(DeleteArgs {
            id: "1".to_string(),
            yes: true,
        });

        let output = run_with_input(&store, command, "").await.expect("deleted");

        assert_eq!(output, "Deleted Jane Doe\n");
    }
}
