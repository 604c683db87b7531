use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::seed;
use crate::model::{Board, KanbanState};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run a read-only subcommand against the seed boards
pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let state = seed::load(cli.seed.as_deref())?;

    match cli.command {
        None => Err("no subcommand given; run `kb` without arguments for the board".into()),
        Some(Commands::Boards) => cmd_boards(&state, json),
        Some(Commands::Show(args)) => cmd_show(&state, args, json),
    }
}

/// Board by name, compared the way board names are kept unique
pub fn find_board<'a>(state: &'a KanbanState, name: &str) -> Option<&'a Board> {
    let wanted = name.trim().to_lowercase();
    state
        .boards
        .iter()
        .map(|b| b.as_ref())
        .find(|b| b.name.to_lowercase() == wanted)
}

fn cmd_boards(state: &KanbanState, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let boards: Vec<(&Board, bool)> = state
        .boards
        .iter()
        .map(|b| (b.as_ref(), state.active == Some(b.id)))
        .collect();

    if json {
        let out: Vec<BoardSummaryJson> = boards
            .iter()
            .map(|(b, active)| board_summary_json(b, *active))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if boards.is_empty() {
        println!("no boards");
    } else {
        for line in format_board_listing(&boards) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_show(
    state: &KanbanState,
    args: ShowArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let board = match &args.board {
        Some(name) => {
            find_board(state, name).ok_or_else(|| format!("no board named '{}'", name))?
        }
        None => state
            .boards
            .first()
            .map(|b| b.as_ref())
            .ok_or("there are no boards")?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&board_to_json(board))?);
    } else {
        for line in format_board(board) {
            println!("{}", line);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_board_ignores_case_and_padding() {
        let state = seed::demo().unwrap();
        assert_eq!(
            find_board(&state, "  platform LAUNCH ").map(|b| b.name.as_str()),
            Some("Platform Launch")
        );
        assert!(find_board(&state, "Nope").is_none());
    }
}
