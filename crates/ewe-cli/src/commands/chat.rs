//! Interactive research session.
//!
//! The session starts on the landing view, moves to searching while a query
//! runs and settles on results. `/reset` clears the conversation and returns
//! to the landing view; `/quit` (or end of input) leaves.

use anyhow::{Context, Result};
use colored::Colorize;
use ewe::prelude::*;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

use super::render;
use crate::config;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Landing,
    Searching,
    Results,
}

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Quit,
    Reset,
    Empty,
    Query(String),
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    match line {
        "" => Input::Empty,
        "/quit" | "/exit" | "/q" => Input::Quit,
        "/reset" | "/new" => Input::Reset,
        query => Input::Query(query.to_string()),
    }
}

/// View state plus the conversation it displays.
#[derive(Debug)]
pub struct ChatSession {
    view: ViewState,
    conversation: Conversation,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            view: ViewState::Landing,
            conversation: Conversation::new(),
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Record the user's query and enter the searching view.
    pub fn begin(&mut self, query: &str) {
        self.conversation.push(ConversationTurn::user(query));
        self.view = ViewState::Searching;
    }

    /// Record the pipeline result. A failure becomes the fixed error turn.
    pub fn finish(&mut self, result: &ewe::core::error::Result<ResearchOutcome>) {
        let turn = match result {
            Ok(outcome) => ConversationTurn::assistant(&outcome.synthesis),
            Err(e) => {
                error!("Research failed: {}", e);
                ConversationTurn::error(USER_FACING_ERROR)
            }
        };
        self.conversation.push(turn);
        self.view = ViewState::Results;
    }

    pub fn reset(&mut self) {
        self.conversation.reset();
        self.view = ViewState::Landing;
    }
}

pub async fn run(settings: &Settings, proxy: bool) -> Result<()> {
    let pipeline = config::build_pipeline(settings, proxy)?;
    let mut session = ChatSession::new();

    print_landing();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".green().bold());
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        match parse_input(&line) {
            Input::Empty => continue,
            Input::Quit => break,
            Input::Reset => {
                session.reset();
                println!();
                print_landing();
            }
            Input::Query(query) => {
                session.begin(&query);

                let pb = render::spinner();
                let progress = |line: &str| pb.set_message(line.to_string());
                let result = pipeline.run(&query, &progress).await;
                pb.finish_and_clear();

                session.finish(&result);
                match &result {
                    Ok(outcome) => render::print_outcome(outcome),
                    Err(_) => println!("{} {}", "✗".red(), USER_FACING_ERROR),
                }
                println!();
            }
        }
    }

    println!("{} Goodbye ({} turns this session)", "✓".green(), session.conversation().len());
    Ok(())
}

fn print_landing() {
    println!("{}", "Ewe - Nigerian traditional medicine research".bold());
    println!("Ask about a plant, a condition or a local remedy, for example:");
    println!("  {} what is bitter leaf used for?", "•".blue());
    println!("  {} scent leaf for fever", "•".blue());
    println!("  {} Moringa oleifera and diabetes", "•".blue());
    println!("{}", "/reset starts over, /quit leaves".dimmed());
    println!();
}
