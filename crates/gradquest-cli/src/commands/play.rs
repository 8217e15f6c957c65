//! The `gradquest play` command: the interactive game loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gradquest_core::bank::build_bank;
use gradquest_core::factory::CourseFactory;
use gradquest_core::parser::parse_question_file;
use gradquest_core::progression::{GameOutcome, Player, RegistrationKind, RetakeOutcome};
use gradquest_core::report::{ExamRecord, GameReport};
use gradquest_core::session::GameSession;
use gradquest_core::traits::{AnswerSource, ChoiceDialog, MessageSink};
use gradquest_io::config::load_config_from;
use gradquest_io::console::{ConsoleAnswerSource, ConsoleDialog, ConsoleSink};

pub fn execute(
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    report_dir: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let report_dir = report_dir.unwrap_or_else(|| config.report_dir.clone());

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // One question pool per archetype. A missing or unreadable file means
    // an empty pool and a degraded game, not an abort.
    let pools = config.archetype_paths().map(|path| {
        match parse_question_file(&path) {
            Ok(records) => build_bank(&records, &mut rng),
            Err(e) => {
                tracing::warn!("{e:#}; starting with an empty question pool");
                Vec::new()
            }
        }
    });
    let factory = CourseFactory::new(pools);

    let mut player = Player::new();
    let mut session = GameSession::new();
    session.start()?;

    let mut answers = ConsoleAnswerSource;
    let mut dialog = ConsoleDialog;
    let mut sink = ConsoleSink;
    let mut exam_records: Vec<ExamRecord> = Vec::new();

    println!("Welcome to gradquest!");
    print_help();

    loop {
        println!();
        println!("1) Register and start next course");
        println!("2) Check credits");
        println!("3) Display registered courses");
        println!("4) Use retake exam option");
        println!("5) Use drop course option");
        println!("6) Pause game");
        println!("7) Help");
        println!("8) Exit");

        let Some(choice) = prompt_line("Choose an option (1-8): ") else {
            break;
        };

        match choice.trim() {
            "1" => register_and_take(
                &mut player,
                &factory,
                &mut rng,
                &mut answers,
                &mut dialog,
                &mut sink,
                &mut exam_records,
            )?,
            "2" => println!("You currently have {} credits.", player.credits()),
            "3" => print_courses(&player),
            "4" => retake(
                &mut player,
                &mut rng,
                &mut answers,
                &mut dialog,
                &mut sink,
                &mut exam_records,
            ),
            "5" => drop_course(&mut player),
            "6" => match session.pause() {
                Ok(()) => {
                    let _ = prompt_line("Game paused. Press Enter to resume.");
                    if let Err(e) = session.resume() {
                        println!("{e}");
                    } else {
                        println!("Game resumed.");
                    }
                }
                Err(e) => println!("{e}"),
            },
            "7" => print_help(),
            "8" => break,
            other => println!("Unknown option: {other}"),
        }

        match player.evaluate_outcome() {
            GameOutcome::Graduated => {
                println!("Congratulations! You are eligible to graduate. You win!");
                break;
            }
            GameOutcome::FlunkedOut => {
                println!("You've failed too many classes and flunked out. You lose.");
                break;
            }
            GameOutcome::InProgress => {}
        }
    }

    session.end();
    let duration_ms = session
        .elapsed()
        .map(|d| d.num_milliseconds().max(0) as u64)
        .unwrap_or(0);

    let report = GameReport::new(&player, exam_records, duration_ms);
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    let path = report_dir.join(format!("game-{timestamp}.json"));
    report.save_json(&path)?;
    println!("Report saved to: {}", path.display());

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn register_and_take<R: Rng>(
    player: &mut Player,
    factory: &CourseFactory,
    rng: &mut R,
    answers: &mut dyn AnswerSource,
    dialog: &mut dyn ChoiceDialog,
    sink: &mut dyn MessageSink,
    exam_records: &mut Vec<ExamRecord>,
) -> Result<()> {
    // An outstanding dropped course always comes first.
    if let Some(course) = player.dropped_courses().front() {
        let name = course.name.clone();
        if !dialog.confirm(&format!("You have a dropped course: {name}. Retake it now?")) {
            println!("You must retake the dropped course before registering anything new.");
            return Ok(());
        }
    }

    let registered = player.register_course(factory);
    match registered.kind {
        RegistrationKind::Retake => {
            println!("Re-registered for dropped course: {}", registered.course_name);
        }
        RegistrationKind::New => {
            println!("Course registered: {}", registered.course_name);
            if let Some(course) = player.course(registered.course_id) {
                println!("{}", course.info());
            }
        }
    }

    if dialog.confirm("Do you want to take the exam now?") {
        let outcome = player.attempt_exam(registered.course_id, rng, answers, dialog, sink)?;
        exam_records.push(ExamRecord::from_outcome(&registered.course_name, &outcome));
    } else {
        println!("You chose not to take the exam now.");
    }

    Ok(())
}

fn retake<R: Rng>(
    player: &mut Player,
    rng: &mut R,
    answers: &mut dyn AnswerSource,
    dialog: &mut dyn ChoiceDialog,
    sink: &mut dyn MessageSink,
    exam_records: &mut Vec<ExamRecord>,
) {
    // Remember the target for the transcript; the engine picks it again.
    let target = player
        .active_courses()
        .iter()
        .find(|c| !c.passed)
        .map(|c| c.name.clone());

    match player.retake_exam(rng, answers, dialog, sink) {
        Ok(RetakeOutcome::Attempted(outcome)) => {
            println!("Retake complete.");
            exam_records.push(ExamRecord::from_outcome(
                target.as_deref().unwrap_or(""),
                &outcome,
            ));
        }
        Ok(RetakeOutcome::NoFailedCourses) => println!("No failed courses to retake."),
        Err(e) => println!("{e}"),
    }
}

fn drop_course(player: &mut Player) {
    if player.active_courses().is_empty() {
        println!("No courses available to drop.");
        return;
    }

    for (i, course) in player.active_courses().iter().enumerate() {
        let status = if course.passed { "Passed" } else { "Not Passed" };
        println!("{}. {} - {}", i + 1, course.name, status);
    }

    let Some(input) = prompt_line("Select the course number to drop (blank to cancel): ") else {
        return;
    };
    let input = input.trim();
    if input.is_empty() {
        println!("Course drop canceled.");
        return;
    }

    match input.parse::<usize>() {
        Ok(n) if (1..=player.active_courses().len()).contains(&n) => {
            let id = player.active_courses()[n - 1].id;
            match player.drop_course(id) {
                Ok(receipt) => {
                    println!(
                        "Course dropped: {}. You must retake it in the future.",
                        receipt.course_name
                    );
                    if receipt.credits_forfeited > 0 {
                        println!(
                            "You have lost {} credits from dropping a passed course.",
                            receipt.credits_forfeited
                        );
                    }
                }
                Err(e) => println!("{e}"),
            }
        }
        _ => println!("Invalid course number."),
    }
}

fn print_courses(player: &Player) {
    if player.active_courses().is_empty() && player.dropped_courses().is_empty() {
        println!("No courses registered yet.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Course", "Professor", "Difficulty", "Status"]);

    for (i, course) in player.active_courses().iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&course.name),
            Cell::new(&course.professor.name),
            Cell::new(course.professor.difficulty),
            Cell::new(if course.passed { "Passed" } else { "Not Passed" }),
        ]);
    }
    for course in player.dropped_courses() {
        table.add_row(vec![
            Cell::new("-"),
            Cell::new(&course.name),
            Cell::new(&course.professor.name),
            Cell::new(course.professor.difficulty),
            Cell::new("Dropped"),
        ]);
    }

    println!("{table}");
}

fn print_help() {
    println!(
        "\n---- Help ----\n\
         Earn 12 credits and pass at least 4 courses to graduate.\n\
         Passing a class earns you 3 credits; pass by scoring at least 6 out of 10 on its exam.\n\
         Hard courses take two exams; after the first you may drop the course instead.\n\
         Dropping a course is a one-shot option, and the course must be retaken later.\n\
         Retaking a failed exam is also a one-shot option.\n\
         Fail more than 2 exams and you flunk out.\n\
         --------------"
    );
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    io::stdout().flush().ok()?;

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}
