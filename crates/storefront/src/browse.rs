use crate::prelude::{eprintln, *};
use colored::Colorize;
use storefront_core::catalog::SortKey;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::controller::{Controller, Event};
use crate::render::TerminalRenderer;
use crate::source::HttpSource;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct BrowseOptions {
    /// Quiet period before a search is applied, in milliseconds
    #[arg(long, default_value = "300", hide = true)]
    pub debounce_ms: u64,

    /// Print every view as a JSON line
    #[arg(long)]
    pub json: bool,
}

/// One line typed at the browse prompt
#[derive(Debug)]
pub enum Input {
    Events(Vec<Event>),
    Help,
    Blank,
}

pub async fn run(options: BrowseOptions, global: crate::Global) -> Result<()> {
    let source = HttpSource::from_global(&global);

    if global.verbose {
        eprintln!("Store API Base: {}", source.base_url());
        eprintln!();
    }

    let (events, receiver) = mpsc::unbounded_channel();
    let controller = Controller::new(source, TerminalRenderer::new(options.json), events.clone())
        .with_debounce(std::time::Duration::from_millis(options.debounce_ms));

    if !options.json {
        print!("{}", help_text());
    }

    let reader = tokio::spawn(read_commands(BufReader::new(tokio::io::stdin()), events));
    controller.run(receiver).await;
    reader.abort();

    Ok(())
}

/// Forward input commands to the controller until `quit` or end of input
///
/// End of input drains the controller instead of quitting it, so piped
/// commands still see their fetches and searches rendered.
async fn read_commands<I: AsyncBufRead + Unpin>(input: I, events: mpsc::UnboundedSender<Event>) {
    let mut lines = input.lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log::error!("Failed to read input: {e}");
                break;
            }
        };

        match parse_input(&line) {
            Ok(Input::Events(batch)) => {
                for event in batch {
                    let quit = matches!(event, Event::Quit);
                    if events.send(event).is_err() || quit {
                        return;
                    }
                }
            }
            Ok(Input::Help) => print!("{}", help_text()),
            Ok(Input::Blank) => {}
            Err(message) => eprintln!("{}", message.red()),
        }
    }

    let _ = events.send(Event::Drain);
}

/// Parse one prompt line into controller events
///
/// `type` replays its text one keystroke at a time, so only the debounced
/// final value reaches the list.
pub fn parse_input(line: &str) -> std::result::Result<Input, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Blank);
    }

    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    let events = match command {
        "search" | "s" => vec![Event::SearchInput(argument.to_string())],
        "type" => {
            let mut typed = String::new();
            argument
                .chars()
                .map(|c| {
                    typed.push(c);
                    Event::SearchInput(typed.clone())
                })
                .collect()
        }
        "filter" | "f" | "unfilter" | "u" => {
            if argument.is_empty() {
                return Err(f!("Usage: {command} <category>"));
            }
            vec![Event::FilterToggle {
                category: argument.to_string(),
                checked: matches!(command, "filter" | "f"),
            }]
        }
        "sort" => {
            if argument.is_empty() {
                return Err("Usage: sort <none|price-asc|price-desc|popularity|title>".to_string());
            }
            vec![Event::SortChange(SortKey::parse(argument))]
        }
        "more" | "m" => vec![Event::LoadMore],
        "quit" | "q" | "exit" => vec![Event::Quit],
        "help" | "h" | "?" => return Ok(Input::Help),
        other => return Err(f!("Unknown command: {other} (try `help`)")),
    };

    Ok(Input::Events(events))
}

fn help_text() -> String {
    let mut result = String::new();

    result.push_str(&f!("\n{}:\n", "Commands".bright_white().bold()));
    for (usage, description) in [
        ("search <text>", "Filter titles by text (empty clears)"),
        ("type <text>", "Type text one keystroke at a time"),
        ("filter <category>", "Add a category filter"),
        ("unfilter <category>", "Remove a category filter"),
        ("sort <key>", "none, price-asc, price-desc, popularity, title"),
        ("more", "Load the next page"),
        ("help", "Show this help"),
        ("quit", "Exit"),
    ] {
        result.push_str(&f!("  {:<22} {}\n", usage.cyan(), description));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(line: &str) -> Vec<Event> {
        match parse_input(line) {
            Ok(Input::Events(events)) => events,
            other => panic!("expected events for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_input_search() {
        let parsed = events("search  Slim Fit ");
        assert!(matches!(&parsed[..], [Event::SearchInput(text)] if text == "Slim Fit"));
    }

    #[test]
    fn test_parse_input_search_clears() {
        let parsed = events("search");
        assert!(matches!(&parsed[..], [Event::SearchInput(text)] if text.is_empty()));
    }

    #[test]
    fn test_parse_input_type_replays_keystrokes() {
        let parsed = events("type bag");
        let texts: Vec<&str> = parsed
            .iter()
            .map(|event| match event {
                Event::SearchInput(text) => text.as_str(),
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(texts, vec!["b", "ba", "bag"]);
    }

    #[test]
    fn test_parse_input_filters() {
        let parsed = events("filter men's clothing");
        assert!(matches!(
            &parsed[..],
            [Event::FilterToggle { category, checked: true }] if category == "men's clothing"
        ));

        let parsed = events("unfilter jewelery");
        assert!(matches!(
            &parsed[..],
            [Event::FilterToggle { category, checked: false }] if category == "jewelery"
        ));
    }

    #[test]
    fn test_parse_input_filter_requires_category() {
        assert!(parse_input("filter").is_err());
    }

    #[test]
    fn test_parse_input_sort() {
        let parsed = events("sort price-desc");
        assert!(matches!(&parsed[..], [Event::SortChange(SortKey::PriceDesc)]));

        let parsed = events("sort shiny");
        assert!(matches!(&parsed[..], [Event::SortChange(SortKey::None)]));
    }

    #[test]
    fn test_parse_input_more_and_quit() {
        assert!(matches!(&events("more")[..], [Event::LoadMore]));
        assert!(matches!(&events("q")[..], [Event::Quit]));
    }

    #[test]
    fn test_parse_input_help_and_blank() {
        assert!(matches!(parse_input("help"), Ok(Input::Help)));
        assert!(matches!(parse_input("   "), Ok(Input::Blank)));
    }

    #[test]
    fn test_parse_input_unknown() {
        let err = parse_input("checkout").unwrap_err();
        assert!(err.contains("Unknown command: checkout"));
    }

    async fn read_all(input: &[u8]) -> Vec<Event> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        read_commands(input, tx).await;

        let mut received = Vec::new();
        while let Ok(event) = rx.try_recv() {
            received.push(event);
        }
        received
    }

    #[tokio::test]
    async fn test_read_commands_drains_at_end_of_input() {
        let received = read_all(b"type sh\nsort title\n").await;

        assert!(matches!(
            &received[..],
            [
                Event::SearchInput(first),
                Event::SearchInput(second),
                Event::SortChange(SortKey::Title),
                Event::Drain,
            ] if first == "s" && second == "sh"
        ));
    }

    #[tokio::test]
    async fn test_read_commands_stops_at_quit() {
        let received = read_all(b"more\nquit\nmore\n").await;

        assert!(matches!(&received[..], [Event::LoadMore, Event::Quit]));
    }

    #[tokio::test]
    async fn test_read_commands_skips_bad_lines() {
        let received = read_all(b"checkout\n\nmore\n").await;

        assert!(matches!(&received[..], [Event::LoadMore, Event::Drain]));
    }

    #[test]
    fn test_help_text_lists_commands() {
        let help = help_text();
        for command in ["search", "type", "filter", "unfilter", "sort", "more", "quit"] {
            assert!(help.contains(command));
        }
    }
}
