//! The interactive numbered menu.

use super::output;
use crate::shelf::Bookshelf;
use crate::{Result, ShelfError};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const MENU: &str = "\
*****************************
    1. Register User
    2. Register Author
    3. Publish Book
    4. List All Books
    5. Add Review to Book
    6. View Book Reviews
    7. Search Books by Title
    8. Top N Books by Rating
    9. Save Application State
    10. Load Application State
    11. List Users
    12. List Authors

    0. Exit
*****************************";

/// Line-oriented menu loop over any reader/writer pair. Errors from an
/// operation are printed and the loop carries on; end of input behaves like
/// choosing Exit.
///
/// A snapshot that failed to load is never overwritten by autosave. Only an
/// explicit save or a later successful load lifts that guard.
pub struct Shell<'a, R, W> {
    shelf: &'a mut Bookshelf,
    input: R,
    output: W,
    autosave_on_exit: bool,
    snapshot_unreadable: bool,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(shelf: &'a mut Bookshelf, input: R, output: W, autosave_on_exit: bool) -> Self {
        Self {
            shelf,
            input,
            output,
            autosave_on_exit,
            snapshot_unreadable: false,
        }
    }

    /// The saved snapshot could not be restored; keep autosave off it
    pub fn with_unreadable_snapshot(mut self) -> Self {
        self.snapshot_unreadable = true;
        self
    }

    pub fn run(mut self) -> Result<()> {
        writeln!(
            self.output,
            "Welcome to the Online Book Publishing & Review System"
        )?;

        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.read_int("Enter choice: ")? else {
                debug!("Input closed");
                break;
            };

            let outcome = match choice {
                0 => break,
                1 => self.register_user(),
                2 => self.register_author(),
                3 => self.publish_book(),
                4 => self.list_books(),
                5 => self.add_review(),
                6 => self.view_reviews(),
                7 => self.search_books(),
                8 => self.top_rated(),
                9 => self.save(),
                10 => self.load(),
                11 => self.list_users(),
                12 => self.list_authors(),
                _ => {
                    writeln!(self.output, "Invalid choice.")?;
                    Ok(())
                }
            };

            if let Err(e) = outcome {
                if matches!(e, ShelfError::Io(_) | ShelfError::Decode(_)) {
                    warn!(error = %e, "Operation failed");
                }
                writeln!(self.output, "Error: {}", e)?;
            }
        }

        if self.autosave_on_exit {
            if self.snapshot_unreadable {
                warn!(path = %self.shelf.store().path().display(), "Autosave skipped");
                writeln!(
                    self.output,
                    "Autosave skipped: {} could not be loaded and was left untouched.",
                    self.shelf.store().path().display()
                )?;
            } else if let Err(e) = self.save() {
                writeln!(self.output, "Error: {}", e)?;
            }
        }
        writeln!(self.output, "Exiting. Goodbye!")?;
        Ok(())
    }

    fn register_user(&mut self) -> Result<()> {
        let name = self.prompt("Enter username: ")?;
        let email = self.prompt("Enter email: ")?;
        let id = self.shelf.register_user(&name, &email)?;
        writeln!(self.output, "User registered with ID: {}", id)?;
        Ok(())
    }

    fn register_author(&mut self) -> Result<()> {
        let name = self.prompt("Enter author name: ")?;
        let email = self.prompt("Enter email: ")?;
        let id = self.shelf.register_author(&name, &email)?;
        writeln!(self.output, "Author registered with ID: {}", id)?;
        Ok(())
    }

    fn publish_book(&mut self) -> Result<()> {
        let author_id = self.prompt("Enter author ID: ")?;
        let title = self.prompt("Enter book title: ")?;
        let content = self.prompt("Enter book content: ")?;
        self.shelf.publish_book(&author_id, &title, &content)?;
        writeln!(self.output, "Book published successfully.")?;
        Ok(())
    }

    fn list_books(&mut self) -> Result<()> {
        let text = output::books(&self.shelf.list_books());
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn add_review(&mut self) -> Result<()> {
        let title = self.prompt("Enter book title: ")?;
        let user_id = self.prompt("Enter your user ID: ")?;
        let rating = self
            .read_int("Enter rating (1-5): ")?
            .ok_or_else(end_of_input)?;
        let comment = self.prompt("Enter comment: ")?;
        self.shelf.add_review(&title, &user_id, rating, &comment)?;
        writeln!(self.output, "Review added.")?;
        Ok(())
    }

    fn view_reviews(&mut self) -> Result<()> {
        let title = self.prompt("Enter book title: ")?;
        let text = output::reviews(&self.shelf.view_reviews(&title)?);
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn search_books(&mut self) -> Result<()> {
        let keyword = self.prompt("Enter keyword to search in titles: ")?;
        let text = output::search_hits(&self.shelf.search_books(&keyword));
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn top_rated(&mut self) -> Result<()> {
        let n = self
            .read_int("Enter number of top books to list: ")?
            .ok_or_else(end_of_input)?;
        let text = output::top_rated(&self.shelf.top_rated(n));
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.shelf.save_state()?;
        self.snapshot_unreadable = false;
        writeln!(
            self.output,
            "Data saved to {}",
            self.shelf.store().path().display()
        )?;
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        let loaded = match self.shelf.load_state() {
            Ok(loaded) => loaded,
            Err(e) => {
                self.snapshot_unreadable = true;
                return Err(e);
            }
        };
        self.snapshot_unreadable = false;
        if loaded {
            writeln!(
                self.output,
                "Data loaded from {}",
                self.shelf.store().path().display()
            )?;
        } else {
            writeln!(self.output, "No saved state found.")?;
        }
        Ok(())
    }

    fn list_users(&mut self) -> Result<()> {
        let text = output::identities(&self.shelf.list_users(), "users");
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn list_authors(&mut self) -> Result<()> {
        let text = output::identities(&self.shelf.list_authors(), "authors");
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print `label` and read one line, without its line ending
    fn prompt(&mut self, label: &str) -> Result<String> {
        self.read_line(label)?.ok_or_else(end_of_input)
    }

    fn read_line(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Keep asking until a number arrives; `None` at end of input
    fn read_int(&mut self, label: &str) -> Result<Option<i64>> {
        loop {
            let Some(line) = self.read_line(label)? else {
                return Ok(None);
            };
            match line.trim().parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }
}

fn end_of_input() -> ShelfError {
    ShelfError::InvalidInput("unexpected end of input".to_string())
}
