//! Interactive terminal front end for [`AuthForm`].

use crate::auth::SessionFactory;
use crate::core::models::Field;
use crate::form::{AuthForm, Notice};
use crate::output::{Browser, Clipboard};

use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use tracing::{event, Level};

pub const TITLE: &str = "Fyers API Authentication";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Generate,
    OpenInBrowser,
    CopyUrl,
    EditField,
    Clear,
    Quit,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Generate => "Generate Auth URL",
            Self::OpenInBrowser => "Open in Browser",
            Self::CopyUrl => "Copy URL",
            Self::EditField => "Edit Field",
            Self::Clear => "Clear",
            Self::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// Menu entries in display order; disabled output actions are left out.
pub fn available_actions(can_open: bool, can_copy: bool) -> Vec<Action> {
    let mut actions = vec![Action::Generate];
    if can_open {
        actions.push(Action::OpenInBrowser);
    }
    if can_copy {
        actions.push(Action::CopyUrl);
    }
    actions.extend([Action::EditField, Action::Clear, Action::Quit]);
    actions
}

fn show(notice: Option<Notice>) {
    if let Some(n) = notice {
        eprintln!("{}", n);
    }
}

fn prompt_field<F, B, C>(form: &mut AuthForm<F, B, C>, field: Field) -> Result<(), InquireError>
where
    F: SessionFactory,
    B: Browser,
    C: Clipboard,
{
    let prompt = format!("{}:", field.label());
    let value = if field.is_masked() {
        Password::new(&prompt)
            .without_confirmation()
            .with_display_mode(PasswordDisplayMode::Masked)
            .prompt()?
    } else {
        Text::new(&prompt).with_initial_value(form.get(field)).prompt()?
    };
    form.set(field, value);
    Ok(())
}

fn is_exit(e: &InquireError) -> bool {
    matches!(
        e,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Cancelling a prompt below the action menu returns to the menu.
fn back_to_menu(result: Result<(), InquireError>) -> Result<bool, InquireError> {
    match result {
        Err(e) if !is_exit(&e) => Err(e),
        _ => Ok(true),
    }
}

fn step<F, B, C>(form: &mut AuthForm<F, B, C>) -> Result<bool, InquireError>
where
    F: SessionFactory,
    B: Browser,
    C: Clipboard,
{
    let actions = available_actions(form.can_open(), form.can_copy());
    let action = Select::new("Action:", actions).prompt()?;
    event!(Level::DEBUG, ?action, "Menu action selected");

    match action {
        Action::Generate => match form.generate() {
            Some(notice) => show(Some(notice)),
            None => {
                if let Some(url) = form.url() {
                    println!("\nGenerated URL:\n{}\n", url);
                }
            }
        },
        Action::OpenInBrowser => show(form.open_in_browser()),
        Action::CopyUrl => show(form.copy_url()),
        Action::EditField => {
            let edited = Select::new("Field:", Field::ALL.to_vec())
                .prompt()
                .and_then(|field| prompt_field(form, field));
            return back_to_menu(edited);
        }
        Action::Clear => form.clear(),
        Action::Quit => return Ok(false),
    }
    Ok(true)
}

/// Runs the form until the user quits or cancels the action menu.
pub fn run<F, B, C>(form: &mut AuthForm<F, B, C>) -> Result<(), InquireError>
where
    F: SessionFactory,
    B: Browser,
    C: Clipboard,
{
    println!("{}\n", TITLE);

    match session(form) {
        Err(e) if is_exit(&e) => Ok(()),
        other => other,
    }
}

fn session<F, B, C>(form: &mut AuthForm<F, B, C>) -> Result<(), InquireError>
where
    F: SessionFactory,
    B: Browser,
    C: Clipboard,
{
    for field in Field::ALL {
        if form.get(field).is_empty() {
            prompt_field(form, field)?;
        }
    }
    loop {
        println!("Status: {}", form.status());
        if !step(form)? {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn output_actions_follow_form_state() {
        assert_eq!(
            available_actions(false, false),
            vec![Action::Generate, Action::EditField, Action::Clear, Action::Quit]
        );
        assert_eq!(
            available_actions(true, true),
            vec![
                Action::Generate,
                Action::OpenInBrowser,
                Action::CopyUrl,
                Action::EditField,
                Action::Clear,
                Action::Quit
            ]
        );
    }

    #[test]
    fn labels_match_buttons() {
        assert_eq!(Action::Generate.to_string(), "Generate Auth URL");
        assert_eq!(Action::OpenInBrowser.to_string(), "Open in Browser");
        assert_eq!(Action::CopyUrl.to_string(), "Copy URL");
    }

    #[test]
    fn cancel_ends_the_session_quietly() {
        assert!(is_exit(&InquireError::OperationCanceled));
        assert!(is_exit(&InquireError::OperationInterrupted));
        assert!(!is_exit(&InquireError::NotTTY));
    }

    #[test]
    fn cancelled_edit_keeps_the_form_open() {
        assert!(matches!(back_to_menu(Ok(())), Ok(true)));
        assert!(matches!(
            back_to_menu(Err(InquireError::OperationCanceled)),
            Ok(true)
        ));
        assert!(matches!(
            back_to_menu(Err(InquireError::OperationInterrupted)),
            Ok(true)
        ));
        assert!(matches!(
            back_to_menu(Err(InquireError::NotTTY)),
            Err(InquireError::NotTTY)
        ));
    }
}
