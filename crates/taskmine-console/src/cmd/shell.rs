use std::io::{self, BufRead, Write};
use std::str::FromStr;

use strum::IntoEnumIterator;

use taskmine_console::client::ApiClient;
use taskmine_console::console::SimulationConsole;
use taskmine_console::form::Field;
use taskmine_console::term::Terminal;

const PROMPT: &str = "taskmine> ";

/// Interactive loop over stdin. Unknown input prints help instead of
/// failing, so a typo never ends the session.
pub async fn execute(api: &str) {
    let mut console = SimulationConsole::new(ApiClient::new(api), Terminal);
    console.load_defaults().await;

    println!("TaskMine interactive console. Type 'help' for commands.");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{}", PROMPT);
        let _ = io::stdout().flush();

        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let mut words = line.split_whitespace();
        match words.next() {
            None => {}
            Some("show") => console.show_form(),
            Some("set") => {
                let (name, value) = (words.next(), words.next());
                match (name, value) {
                    (Some(name), Some(value)) => set_field(&mut console, name, value),
                    _ => println!("usage: set <field> <value>"),
                }
            }
            Some("run") => console.run().await,
            Some("reset") => {
                console.reset().await;
                println!("Form reset to the published defaults.");
            }
            Some("fields") => {
                for field in Field::iter() {
                    println!("  {}", field);
                }
            }
            Some("quit") | Some("exit") => break,
            Some(other) => {
                if other != "help" {
                    println!("Unknown command: {}", other);
                }
                print_help();
            }
        }
    }
}

fn set_field(console: &mut SimulationConsole<Terminal>, name: &str, value: &str) {
    match Field::from_str(name) {
        Ok(field) => match console.set_field(field, value) {
            Ok(()) => println!("{} = {}", field, console.form().get(field)),
            Err(e) => println!("{}", e),
        },
        Err(_) => println!("Unknown field: {} (try 'fields')", name),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  show                 display the current form");
    println!("  set <field> <value>  edit one field");
    println!("  run                  run a simulation with the current form");
    println!("  reset                reload the published defaults");
    println!("  fields               list editable fields");
    println!("  quit | exit          leave the console");
}
