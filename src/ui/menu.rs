use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::{debug, error};

use crate::error::CatalogError;
use crate::ids::IdGenerator;
use crate::store::{Catalog, Storage};

use super::prompt::{parse_year, Prompter};
use super::render::{surface_error, Renderer, Tone};

const MENU_ENTRIES: [&str; 6] = [
    "1. Add a book",
    "2. Delete a book",
    "3. Search books",
    "4. List all books",
    "5. Change book status",
    "6. Exit",
];
const FAREWELL: &str = "Thank you for using the catalog. Goodbye!";

/// The six actions offered by the numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Add,
    Delete,
    Search,
    List,
    UpdateStatus,
    Exit,
}

impl FromStr for Choice {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "1" => Ok(Choice::Add),
            "2" => Ok(Choice::Delete),
            "3" => Ok(Choice::Search),
            "4" => Ok(Choice::List),
            "5" => Ok(Choice::UpdateStatus),
            "6" => Ok(Choice::Exit),
            _ => Err(()),
        }
    }
}

/// Whether the loop keeps going after an action.
enum Flow {
    Continue,
    Quit,
}

/// Run the interactive menu until the user picks "6" or input ends.
/// `styled` asks for colored output; `NO_COLOR` still turns it off.
///
/// Missing ids and bad input are reported on one line and the loop carries
/// on. Storage faults end the loop and come back as an error so the caller
/// can exit loudly instead of pretending the catalog was saved.
pub fn run_menu<S, G, R, W>(
    catalog: &Catalog<S, G>,
    input: R,
    output: W,
    styled: bool,
) -> Result<()>
where
    S: Storage,
    G: IdGenerator,
    R: BufRead,
    W: Write,
{
    let mut menu = Menu {
        catalog,
        prompter: Prompter::new(input, output),
        render: Renderer::new(styled),
    };
    menu.run()
}

struct Menu<'a, S, G, R, W> {
    catalog: &'a Catalog<S, G>,
    prompter: Prompter<R, W>,
    render: Renderer,
}

impl<S, G, R, W> Menu<'_, S, G, R, W>
where
    S: Storage,
    G: IdGenerator,
    R: BufRead,
    W: Write,
{
    fn run(&mut self) -> Result<()> {
        loop {
            self.show_menu().context("failed to write menu")?;
            let Some(raw) = self.ask("Choose an action: ")? else {
                return self.farewell();
            };

            let Ok(choice) = raw.parse::<Choice>() else {
                self.say(Tone::Error, "Error: invalid choice, please try again.")?;
                continue;
            };
            debug!(?choice, "menu selection");

            let outcome = match choice {
                Choice::Add => self.add(),
                Choice::Delete => self.delete(),
                Choice::Search => self.search(),
                Choice::List => self.list(),
                Choice::UpdateStatus => self.update_status(),
                Choice::Exit => return self.farewell(),
            };

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return self.farewell(),
                Err(err) => self.report(err)?,
            }
        }
    }

    fn add(&mut self) -> Result<Flow> {
        let Some(title) = self.ask("Enter the title: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(author) = self.ask("Enter the author: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(raw_year) = self.ask("Enter the publication year: ")? else {
            return Ok(Flow::Quit);
        };

        let year = parse_year(&raw_year)?;
        let id = self.catalog.add(&title, &author, year)?;
        self.say(
            Tone::Success,
            format!("Book '{title}' added successfully (id: {id})."),
        )?;
        Ok(Flow::Continue)
    }

    fn delete(&mut self) -> Result<Flow> {
        let Some(id) = self.ask("Enter the book id: ")? else {
            return Ok(Flow::Quit);
        };
        self.catalog.delete(id.trim())?;
        self.say(Tone::Success, "Book deleted.")?;
        Ok(Flow::Continue)
    }

    fn search(&mut self) -> Result<Flow> {
        let Some(query) = self.ask("Enter a title, author or year: ")? else {
            return Ok(Flow::Quit);
        };
        let results = self.catalog.search(&query)?;
        if results.is_empty() {
            self.say(Tone::Warning, "No books found.")?;
        } else {
            self.render
                .books(&mut self.prompter.output, &results)
                .context("failed to write search results")?;
        }
        Ok(Flow::Continue)
    }

    fn list(&mut self) -> Result<Flow> {
        let books = self.catalog.list()?;
        if books.is_empty() {
            self.say(Tone::Warning, "The library is empty.")?;
        } else {
            self.render
                .books(&mut self.prompter.output, &books)
                .context("failed to write book list")?;
        }
        Ok(Flow::Continue)
    }

    fn update_status(&mut self) -> Result<Flow> {
        let Some(id) = self.ask("Enter the book id: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(status) = self.ask("Enter the new status ('available' or 'checked out'): ")?
        else {
            return Ok(Flow::Quit);
        };
        self.catalog.update_status(id.trim(), &status)?;
        self.say(Tone::Success, "Book status updated.")?;
        Ok(Flow::Continue)
    }

    /// Print user-level failures and keep going; hand storage faults back.
    fn report(&mut self, err: anyhow::Error) -> Result<()> {
        if let Some(catalog_err) = err.downcast_ref::<CatalogError>() {
            if !catalog_err.is_storage_fault() {
                let tone = match catalog_err {
                    CatalogError::NotFound(_) => Tone::Warning,
                    _ => Tone::Error,
                };
                let message = format!("Error: {}", surface_error(&err));
                return self.say(tone, message);
            }
        }

        error!(error = %err, "catalog operation failed");
        Err(err.context("catalog operation aborted"))
    }

    fn show_menu(&mut self) -> std::io::Result<()> {
        let out = &mut self.prompter.output;
        writeln!(out)?;
        self.render.heading(out, "Menu:")?;
        for entry in MENU_ENTRIES {
            writeln!(out, "{entry}")?;
        }
        Ok(())
    }

    fn ask(&mut self, label: &str) -> Result<Option<String>> {
        self.prompter.ask(label).context("failed to read input")
    }

    fn say(&mut self, tone: Tone, text: impl std::fmt::Display) -> Result<()> {
        self.render
            .line(&mut self.prompter.output, tone, text)
            .context("failed to write output")
    }

    fn farewell(&mut self) -> Result<()> {
        self.say(Tone::Success, FAREWELL)?;
        self.prompter
            .output
            .flush()
            .context("failed to flush output")
    }
}
