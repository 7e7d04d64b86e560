//! Terminal output helpers.
//!
//! Every printer has a `_to` variant writing to any `Write`, so the layout
//! can be tested without a terminal.

use std::io::{self, Write};

use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use dialoguer::console::style;
use quizzer_core::{GradeOutcome, Lesson, Question, QuizSummary, RoundScore};

const HEADER_WIDTH: usize = 60;

/// Draws a boxed header with the given title.
pub fn print_header(title: &str) {
    let _ = print_header_to(&mut io::stdout(), title);
}

/// Draws a boxed header to a writer (for testing).
pub fn print_header_to<W: Write>(w: &mut W, title: &str) -> io::Result<()> {
    let border = "─".repeat(HEADER_WIDTH);
    writeln!(w, "┌{}┐", border)?;
    writeln!(w, "│ {:<width$} │", title, width = HEADER_WIDTH - 2)?;
    writeln!(w, "└{}┘", border)?;
    writeln!(w)?;
    Ok(())
}

/// Prints a step message with a trailing space (no newline).
pub fn print_step(message: &str) {
    let _ = print_step_to(&mut io::stdout(), message);
}

/// Prints a step message to a writer (for testing).
pub fn print_step_to<W: Write>(w: &mut W, message: &str) -> io::Result<()> {
    write!(w, "{} ", message)?;
    w.flush()
}

/// Prints a success message with a green checkmark.
pub fn print_success(message: &str) {
    let _ = print_success_to(&mut io::stdout(), message);
}

/// Prints a success message to a writer (for testing).
pub fn print_success_to<W: Write>(w: &mut W, message: &str) -> io::Result<()> {
    writeln!(
        w,
        "\n{} {}",
        style("✓").green().bold(),
        style(message).green()
    )
}

/// Prints an error message with a red X.
pub fn print_error(message: &str) {
    let _ = print_error_to(&mut io::stdout(), message);
}

/// Prints an error message to a writer (for testing).
pub fn print_error_to<W: Write>(w: &mut W, message: &str) -> io::Result<()> {
    writeln!(w, "\n{} {}", style("✗").red().bold(), style(message).red())
}

/// Question prompt with its position in the round.
pub fn print_question_to<W: Write>(
    w: &mut W,
    question: &Question,
    number: usize,
    total: usize,
) -> io::Result<()> {
    writeln!(w)?;
    writeln!(
        w,
        "{} {}",
        style(format!("Question {number}/{total}:")).cyan().bold(),
        question.text()
    )?;
    if let Some(topic) = question.topic() {
        writeln!(w, "{}", style(format!("Topic: {topic}")).dim())?;
    }
    Ok(())
}

/// Grading feedback, naming the right option on a miss.
pub fn print_feedback_to<W: Write>(
    w: &mut W,
    question: &Question,
    outcome: &GradeOutcome,
) -> io::Result<()> {
    if outcome.correct {
        print_success_to(w, "Correct!")
    } else {
        let expected = &question.options()[outcome.expected.index()];
        print_error_to(w, &format!("Incorrect. The correct answer was {expected}"))
    }
}

pub fn print_lesson_to<W: Write>(w: &mut W, lesson: &Lesson) -> io::Result<()> {
    writeln!(w)?;
    writeln!(
        w,
        "{} {}",
        style("Lesson:").yellow().bold(),
        lesson.topics().join(", ")
    )?;
    writeln!(w)?;
    writeln!(w, "{}", lesson.text())
}

/// End-of-round score line.
pub fn print_round_to<W: Write>(w: &mut W, round: usize, score: &RoundScore) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "Round {round} complete: {score}")
}

/// Per-round results table plus improvement line.
pub fn summary_table(summary: &QuizSummary) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Round").fg(Color::Cyan),
        Cell::new("Correct").fg(Color::Cyan),
        Cell::new("Score").fg(Color::Cyan),
    ]);

    for (i, round) in summary.rounds.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format!("{}/{}", round.correct, round.total)),
            Cell::new(format!("{:.1}%", round.percent())),
        ]);
    }

    table
}

pub fn print_summary_to<W: Write>(w: &mut W, summary: &QuizSummary) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{}", summary_table(summary))?;
    if let Some(points) = summary.improvement {
        writeln!(w, "Improvement: {:+.1} percentage points", points)?;
    }
    Ok(())
}
