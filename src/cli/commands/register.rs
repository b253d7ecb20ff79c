use super::CommandHandler;
use crate::shelf::Bookshelf;
use crate::Result;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityKind {
    User,
    Author,
}

/// Handler for `register-user` and `register-author`
pub struct RegisterCommand {
    pub kind: IdentityKind,
    pub name: String,
    pub email: String,
}

impl RegisterCommand {
    pub fn user(name: String, email: String) -> Self {
        Self {
            kind: IdentityKind::User,
            name,
            email,
        }
    }

    pub fn author(name: String, email: String) -> Self {
        Self {
            kind: IdentityKind::Author,
            name,
            email,
        }
    }
}

impl CommandHandler for RegisterCommand {
    fn execute(&self, shelf: &mut Bookshelf, out: &mut dyn Write) -> Result<()> {
        match self.kind {
            IdentityKind::User => {
                let id = shelf.register_user(&self.name, &self.email)?;
                writeln!(out, "User registered with ID: {}", id)?;
            }
            IdentityKind::Author => {
                let id = shelf.register_author(&self.name, &self.email)?;
                writeln!(out, "Author registered with ID: {}", id)?;
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        match self.kind {
            IdentityKind::User => "register-user",
            IdentityKind::Author => "register-author",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::create_test_shelf;
    use crate::ShelfError;

    #[test]
    fn test_register_user_prints_id() {
        let (mut shelf, _temp_dir) = create_test_shelf();
        let mut out = Vec::new();

        RegisterCommand::user("alice".to_string(), "alice@x.com".to_string())
            .execute(&mut shelf, &mut out)
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "User registered with ID: U001\n");
    }

    #[test]
    fn test_register_author_duplicate() {
        let (mut shelf, _temp_dir) = create_test_shelf();
        let mut out = Vec::new();
        let command = RegisterCommand::author("bob".to_string(), "bob@x.com".to_string());

        command.execute(&mut shelf, &mut out).unwrap();
        let err = command.execute(&mut shelf, &mut out).unwrap_err();

        assert!(matches!(err, ShelfError::DuplicateIdentity(_)));
    }
}
