// 🖥️ Console Driver - numbered menu over the user registry
//
// Loop: print menu → read choice → run registry/matcher call → print result.
// Domain errors (not found, bad input) are printed and the loop continues;
// only I/O failures on the streams end the session early.

use crate::entities::{parse_age, parse_interests, ProfileUpdate, UserRegistry};
use crate::error::DirectoryError;
use crate::matching::match_profiles;
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const BANNER: &str = "Welcome to BrayMatch Dating Console";
const GOODBYE: &str =
    "Exiting BrayMatch Dating Console. Thank you for using BrayMatch dating Console. Goodbye!";

// ============================================================================
// MENU
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CreateUser,
    ListUsers,
    UpdateUser,
    DeleteUser,
    FindUser,
    ShowMatches,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::CreateUser,
        MenuChoice::ListUsers,
        MenuChoice::UpdateUser,
        MenuChoice::DeleteUser,
        MenuChoice::FindUser,
        MenuChoice::ShowMatches,
        MenuChoice::Exit,
    ];

    /// Parse the operator's menu line ("1".."7", surrounding whitespace ignored)
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(MenuChoice::CreateUser),
            "2" => Some(MenuChoice::ListUsers),
            "3" => Some(MenuChoice::UpdateUser),
            "4" => Some(MenuChoice::DeleteUser),
            "5" => Some(MenuChoice::FindUser),
            "6" => Some(MenuChoice::ShowMatches),
            "7" => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            MenuChoice::CreateUser => 1,
            MenuChoice::ListUsers => 2,
            MenuChoice::UpdateUser => 3,
            MenuChoice::DeleteUser => 4,
            MenuChoice::FindUser => 5,
            MenuChoice::ShowMatches => 6,
            MenuChoice::Exit => 7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::CreateUser => "Create User",
            MenuChoice::ListUsers => "View All Users",
            MenuChoice::UpdateUser => "Update User",
            MenuChoice::DeleteUser => "Delete User",
            MenuChoice::FindUser => "Find User",
            MenuChoice::ShowMatches => "View Match Profiles",
            MenuChoice::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Title,
    Success,
    Error,
    Highlight,
}

// ============================================================================
// CONSOLE
// ============================================================================

/// Menu-driven session over one registry.
///
/// Generic over its streams so tests can script input and capture output.
pub struct Console<R, W> {
    registry: UserRegistry,
    input: R,
    output: W,
    #[cfg_attr(not(feature = "color"), allow(dead_code))]
    color: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(registry: UserRegistry, input: R, output: W) -> Self {
        Self {
            registry,
            input,
            output,
            color: false,
        }
    }

    /// Enable terminal styling (no effect without the `color` feature)
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    pub fn into_parts(self) -> (UserRegistry, W) {
        (self.registry, self.output)
    }

    /// Run until the operator exits or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;

            let Some(line) = self.prompt("Enter your choice: ")? else {
                debug!("input closed");
                return Ok(());
            };

            let flow = match MenuChoice::parse(&line) {
                Some(choice) => {
                    debug!(choice = choice.number(), "menu choice");
                    self.dispatch(choice)?
                }
                None => {
                    warn!(input = %line.trim(), "invalid menu choice");
                    let msg = self.paint("Invalid choice. Please try again.", Tone::Error);
                    writeln!(self.output, "{}", msg)?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<Flow> {
        match choice {
            MenuChoice::CreateUser => self.create_user(),
            MenuChoice::ListUsers => self.list_users(),
            MenuChoice::UpdateUser => self.update_user(),
            MenuChoice::DeleteUser => self.delete_user(),
            MenuChoice::FindUser => self.find_user(),
            MenuChoice::ShowMatches => self.show_matches(),
            MenuChoice::Exit => {
                writeln!(self.output, "{}", GOODBYE)?;
                Ok(Flow::Quit)
            }
        }
    }

    // ========================================================================
    // ACTIONS
    // ========================================================================

    fn create_user(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Enter name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(age) = self.prompt("Enter age: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(gender) = self.prompt("Enter gender: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(interests) = self.prompt("Enter interests (comma separated): ")? else {
            return Ok(Flow::Quit);
        };

        let age = match parse_age(&age) {
            Ok(age) => age,
            Err(err) => return self.report(&err),
        };

        let id = self
            .registry
            .create(name.clone(), age, gender, parse_interests(&interests));

        let msg = self.paint(
            &format!("User {} created successfully with ID: {}", name, id),
            Tone::Success,
        );
        writeln!(self.output, "{}", msg)?;
        Ok(Flow::Continue)
    }

    fn list_users(&mut self) -> Result<Flow> {
        if self.registry.is_empty() {
            writeln!(self.output, "No users found.")?;
            return Ok(Flow::Continue);
        }

        for user in self.registry.list_all() {
            writeln!(self.output, "{}", user.view().to_json()?)?;
        }
        Ok(Flow::Continue)
    }

    fn update_user(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt("Enter user ID to update: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(name) = self.prompt("Enter new name (leave blank to skip): ")? else {
            return Ok(Flow::Quit);
        };
        let Some(age) = self.prompt("Enter new age (leave blank to skip): ")? else {
            return Ok(Flow::Quit);
        };
        let Some(gender) = self.prompt("Enter new gender (leave blank to skip): ")? else {
            return Ok(Flow::Quit);
        };
        let Some(interests) = self.prompt("Enter new interests (leave blank to skip): ")? else {
            return Ok(Flow::Quit);
        };

        // Blank means skip; anything else is applied as typed
        let age = if age.trim().is_empty() {
            None
        } else {
            match parse_age(&age) {
                Ok(age) => Some(age),
                Err(err) => return self.report(&err),
            }
        };

        let update = ProfileUpdate {
            name: non_blank(name),
            age,
            gender: non_blank(gender),
            // A line of bare commas carries no tags and is skipped like a blank one
            interests: Some(parse_interests(&interests)).filter(|tags| !tags.is_empty()),
        };

        let id = id.trim();
        let result = self.registry.update(id, update).map(|_| ());
        match result {
            Ok(_) => {
                let msg = self.paint(&format!("User {} updated successfully.", id), Tone::Success);
                writeln!(self.output, "{}", msg)?;
                Ok(Flow::Continue)
            }
            Err(err) => self.report(&err),
        }
    }

    fn delete_user(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt("Enter user ID to delete: ")? else {
            return Ok(Flow::Quit);
        };

        let id = id.trim();
        match self.registry.delete(id) {
            Ok(_) => {
                let msg = self.paint(&format!("User {} deleted successfully.", id), Tone::Success);
                writeln!(self.output, "{}", msg)?;
                Ok(Flow::Continue)
            }
            Err(err) => self.report(&err),
        }
    }

    fn find_user(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt("Enter user ID to find: ")? else {
            return Ok(Flow::Quit);
        };

        let id = id.trim();
        let view = self.registry.find(id).map(|user| user.view());
        match view {
            Some(view) => {
                writeln!(self.output, "User found:")?;
                writeln!(self.output, "{}", view.to_json()?)?;
            }
            None => {
                let msg = self.paint(&format!("User with ID {} not found.", id), Tone::Error);
                writeln!(self.output, "{}", msg)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn show_matches(&mut self) -> Result<Flow> {
        let matches = match_profiles(self.registry.users());
        if matches.is_empty() {
            writeln!(self.output, "No matches found.")?;
            return Ok(Flow::Continue);
        }

        for m in &matches {
            let names = self.paint(
                &format!("{} and {}", m.first.name, m.second.name),
                Tone::Highlight,
            );
            writeln!(
                self.output,
                "Match: {} (shared: {})",
                names,
                m.shared_interests.join(", ")
            )?;
        }
        Ok(Flow::Continue)
    }

    // ========================================================================
    // I/O HELPERS
    // ========================================================================

    fn print_menu(&mut self) -> Result<()> {
        let banner = self.paint(BANNER, Tone::Title);
        writeln!(self.output)?;
        writeln!(self.output, "{}", banner)?;
        writeln!(self.output, "Please choose from the menu below:")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.number(), choice.label())?;
        }
        Ok(())
    }

    /// Print `prompt`, read one line. `None` once input is exhausted.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(|c| c == '\n' || c == '\r');
        Ok(Some(trimmed.to_string()))
    }

    fn report(&mut self, err: &DirectoryError) -> Result<Flow> {
        debug!(error = %err, "operation rejected");
        let msg = self.paint(&err.to_string(), Tone::Error);
        writeln!(self.output, "{}", msg)?;
        Ok(Flow::Continue)
    }

    #[cfg(feature = "color")]
    fn paint(&self, text: &str, tone: Tone) -> String {
        use crossterm::style::Stylize;

        if !self.color {
            return text.to_string();
        }
        match tone {
            Tone::Title => text.bold().cyan().to_string(),
            Tone::Success => text.green().to_string(),
            Tone::Error => text.red().to_string(),
            Tone::Highlight => text.magenta().to_string(),
        }
    }

    #[cfg(not(feature = "color"))]
    fn paint(&self, text: &str, _tone: Tone) -> String {
        text.to_string()
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(registry: UserRegistry, script: &str) -> (UserRegistry, String) {
        let mut console = Console::new(registry, Cursor::new(script.to_string()), Vec::new());
        console.run().unwrap();
        let (registry, output) = console.into_parts();
        (registry, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::CreateUser));
        assert_eq!(MenuChoice::parse(" 6 "), Some(MenuChoice::ShowMatches));
        assert_eq!(MenuChoice::parse("7"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("8"), None);
        assert_eq!(MenuChoice::parse(""), None);
        assert_eq!(MenuChoice::parse("exit"), None);

        for choice in MenuChoice::ALL {
            assert_eq!(MenuChoice::parse(&choice.number().to_string()), Some(choice));
        }
    }

    #[test]
    fn test_create_then_list() {
        let (registry, output) = run_script(
            UserRegistry::new(),
            "1\nAlice\n29\nfemale\nhiking,jazz\n2\n7\n",
        );

        assert_eq!(registry.len(), 1);
        let user = &registry.users()[0];
        assert_eq!(user.name, "Alice");
        assert_eq!(user.age, 29);
        assert_eq!(user.interests, vec!["hiking", "jazz"]);

        assert!(output.contains(&format!(
            "User Alice created successfully with ID: {}",
            user.id()
        )));
        assert!(output.contains(&user.view().to_json().unwrap()));
        assert!(output.contains(GOODBYE));
    }

    #[test]
    fn test_list_empty() {
        let (_, output) = run_script(UserRegistry::new(), "2\n7\n");
        assert!(output.contains("No users found."));
    }

    #[test]
    fn test_invalid_choice_redisplays_menu() {
        let (_, output) = run_script(UserRegistry::new(), "9\n7\n");

        assert!(output.contains("Invalid choice. Please try again."));
        assert_eq!(output.matches(BANNER).count(), 2);
    }

    #[test]
    fn test_invalid_age_is_reported_and_loop_continues() {
        let (registry, output) = run_script(UserRegistry::new(), "1\nBob\nabc\nmale\nx\n2\n7\n");

        assert!(registry.is_empty());
        assert!(output.contains("Invalid input: age must be a non-negative whole number"));
        assert!(!output.contains("Invalid choice"));
        assert!(output.contains("No users found."));
        assert!(output.contains(GOODBYE));
    }

    #[test]
    fn test_end_of_input_stops_loop() {
        let (_, output) = run_script(UserRegistry::new(), "2\n");

        assert!(output.contains("No users found."));
        assert!(!output.contains(GOODBYE));
    }

    #[test]
    fn test_end_of_input_mid_action_stops_loop() {
        let (registry, _) = run_script(UserRegistry::new(), "1\nAlice\n");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_update_with_blank_fields_changes_nothing() {
        let mut registry = UserRegistry::new();
        let id = registry.create("Chen".to_string(), 41, "male".to_string(), vec!["chess".to_string()]);
        let before = registry.find(&id.to_string()).unwrap().clone();

        let (registry, output) = run_script(registry, &format!("3\n{}\n\n\n\n\n7\n", id));

        assert!(output.contains(&format!("User {} updated successfully.", id)));
        assert_eq!(registry.find(&id.to_string()).unwrap(), &before);
    }

    #[test]
    fn test_update_applies_typed_fields_including_zero_age() {
        let mut registry = UserRegistry::new();
        let id = registry.create("Chen".to_string(), 41, "male".to_string(), vec!["chess".to_string()]);

        let (registry, _) = run_script(registry, &format!("3\n{}\nChen L\n0\n\ngo,chess\n7\n", id));

        let user = registry.find(&id.to_string()).unwrap();
        assert_eq!(user.name, "Chen L");
        assert_eq!(user.age, 0);
        assert_eq!(user.gender, "male");
        assert_eq!(user.interests, vec!["go", "chess"]);
    }

    #[test]
    fn test_update_with_only_commas_keeps_interests() {
        let mut registry = UserRegistry::new();
        let id = registry.create("Chen".to_string(), 41, "male".to_string(), vec!["chess".to_string()]);

        let (registry, output) = run_script(registry, &format!("3\n{}\n\n\n\n,,\n7\n", id));

        assert!(output.contains(&format!("User {} updated successfully.", id)));
        let user = registry.find(&id.to_string()).unwrap();
        assert_eq!(user.interests, vec!["chess"]);
        assert_eq!(user.version, 1);
    }

    #[test]
    fn test_no_escape_codes_without_color() {
        let (_, output) = run_script(UserRegistry::with_demo_profiles(), "1\nA\n3\nf\nx\n6\n9\n7\n");

        assert!(output.contains(BANNER));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_update_invalid_age_mutates_nothing() {
        let mut registry = UserRegistry::new();
        let id = registry.create("Chen".to_string(), 41, "male".to_string(), vec![]);

        let (registry, output) = run_script(registry, &format!("3\n{}\nNew\nold\n\n\n7\n", id));

        assert!(output.contains("Invalid input"));
        let user = registry.find(&id.to_string()).unwrap();
        assert_eq!(user.name, "Chen");
        assert_eq!(user.age, 41);
    }

    #[test]
    fn test_update_unknown_user() {
        let (_, output) = run_script(UserRegistry::new(), "3\nnope\nName\n\n\n\n7\n");
        assert!(output.contains("User nope not found."));
    }

    #[test]
    fn test_delete_user() {
        let mut registry = UserRegistry::new();
        let id = registry.create("Dana".to_string(), 26, "female".to_string(), vec![]);

        let (registry, output) = run_script(registry, &format!("4\n{}\n4\n{}\n7\n", id, id));

        assert!(registry.is_empty());
        assert!(output.contains(&format!("User {} deleted successfully.", id)));
        assert!(output.contains(&format!("User {} not found.", id)));
    }

    #[test]
    fn test_find_user() {
        let mut registry = UserRegistry::new();
        let id = registry.create("Dana".to_string(), 26, "female".to_string(), vec![]);
        let json = registry.find(&id.to_string()).unwrap().view().to_json().unwrap();

        let (_, output) = run_script(registry, &format!("5\n {} \n5\nmissing\n7\n", id));

        assert!(output.contains("User found:"));
        assert!(output.contains(&json));
        assert!(output.contains("User with ID missing not found."));
    }

    #[test]
    fn test_show_matches() {
        let (_, output) = run_script(UserRegistry::with_demo_profiles(), "6\n7\n");

        assert!(output.contains("Match: Alice and Bruno (shared: jazz)"));
        assert!(output.contains("Match: Alice and Dana (shared: hiking)"));
        assert!(output.contains("Match: Bruno and Dana (shared: cooking)"));
        assert!(!output.contains("Chen and"));
        assert!(!output.contains("and Chen"));
    }

    #[test]
    fn test_show_matches_empty() {
        let (_, output) = run_script(UserRegistry::new(), "6\n7\n");
        assert!(output.contains("No matches found."));
    }

    #[cfg(feature = "color")]
    #[test]
    fn test_color_output() {
        let mut console = Console::new(UserRegistry::new(), Cursor::new("7\n"), Vec::new())
            .with_color(true);
        console.run().unwrap();
        let (_, output) = console.into_parts();

        assert!(String::from_utf8(output).unwrap().contains("\u{1b}["));
    }
}
