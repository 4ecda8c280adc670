#![allow(clippy::print_stdout)]

use crate::cli::Command;
use anyhow::{Context, anyhow};
use lectern::{Lectern, LessonBody};
use lectern::domain::constants::INCORRECT_SECRET_MESSAGE;
use lectern::domain::{Lesson, ProgressSummary};
use lectern::features::access::AccessState;
use lectern::features::release::CountdownState;

pub(crate) async fn run(app: &Lectern, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { secret } => match app.session().login(&secret).await? {
            Some(tier) => println!("Unlocked the {} plan", tier.display_name()),
            None => println!("{INCORRECT_SECRET_MESSAGE}"),
        },
        Command::Logout => {
            app.session().logout().await?;
            println!("Logged out");
        },
        Command::Status => status(app),
        Command::Modules => modules(app),
        Command::Lessons { module } => lessons(app, &module)?,
        Command::Play { lesson, href } => play(app, &lesson, &href)?,
        Command::Toggle { lesson } => {
            let completed = app.toggle_completion(&lesson).await?;
            println!("{lesson}: {}", if completed { "completed" } else { "not completed" });
            println!("Course: {}", summary(&app.course_progress()));
        },
        Command::Next { lesson } => {
            lookup(app, &lesson)?;
            neighbour(app.course().next(&lesson), "This is the last lesson");
        },
        Command::Prev { lesson } => {
            lookup(app, &lesson)?;
            neighbour(app.course().previous(&lesson), "This is the first lesson");
        },
        Command::Countdown { lesson, watch } => countdown(app, &lesson, watch).await?,
        Command::Preview { count, watch } => preview(app, count, watch).await?,
    }
    Ok(())
}

fn lookup<'a>(app: &'a Lectern, lesson_id: &str) -> anyhow::Result<&'a Lesson> {
    app.course().lesson(lesson_id).ok_or_else(|| anyhow!("Unknown lesson: {lesson_id}"))
}

fn summary(progress: &ProgressSummary) -> String {
    format!("{}/{} ({}%)", progress.completed, progress.total, progress.percentage)
}

fn status(app: &Lectern) {
    match app.tier() {
        Some(tier) => println!("Plan: {}", tier.display_name()),
        None => println!("Plan: none"),
    }
    println!("Progress: {}", summary(&app.course_progress()));
}

fn modules(app: &Lectern) {
    for module in app.course().modules() {
        let progress = app.progress().module_progress(module);
        let tier = module.required_tier.map_or("", |tier| tier.display_name());
        println!("{:<24} {:<40} {:>8} {}", module.id, module.title, tier, summary(&progress));
    }
}

fn lessons(app: &Lectern, module_id: &str) -> anyhow::Result<()> {
    let module =
        app.course().module(module_id).ok_or_else(|| anyhow!("Unknown module: {module_id}"))?;
    for view in app.module_view(module) {
        let mark = if view.completed { "x" } else { " " };
        let state = match view.access.state(view.lesson) {
            AccessState::Playable => String::new(),
            AccessState::Locked { required } => format!("requires {}", required.display_name()),
            AccessState::Pending { release } => format!("opens {release}"),
        };
        let lesson = view.lesson;
        println!("[{mark}] {:<24} {:<40} {:>6} {state}", lesson.id, lesson.title, lesson.duration);
    }
    Ok(())
}

fn play(app: &Lectern, lesson_id: &str, href: &str) -> anyhow::Result<()> {
    let page =
        app.lesson_page(lesson_id, href).ok_or_else(|| anyhow!("Unknown lesson: {lesson_id}"))?;
    let lesson = page.lesson;

    println!("{} / {}", page.module.title, lesson.title);
    if !lesson.duration.is_empty() {
        println!("Duration: {}", lesson.duration);
    }
    if !lesson.description.is_empty() {
        println!("\n{}", lesson.description);
    }

    match page.body {
        LessonBody::Locked { required } => {
            println!("\nLocked: available with the {} plan", required.display_name());
        },
        LessonBody::Pending { release, countdown } => {
            println!("\nOpens {release}");
            if let CountdownState::Counting(left) = countdown {
                println!("Starts in {left}");
            }
        },
        LessonBody::Playable { player_url, content, contact, buttons } => {
            match player_url {
                Some(url) => println!("\nPlayer: {url}"),
                None => println!("\nNo video for this lesson"),
            }
            if let Some(content) = content {
                println!("\n{content}");
            }
            if let Some(contact) = contact {
                println!("\n{contact}");
            }
            for button in buttons {
                println!("  [{}] {}", button.label, button.url);
            }
            println!("\nCompleted: {}", if page.completed { "yes" } else { "no" });
        },
    }
    Ok(())
}

fn neighbour(lesson: Option<&Lesson>, edge: &str) {
    match lesson {
        Some(lesson) => println!("{} ({})", lesson.id, lesson.title),
        None => println!("{edge}"),
    }
}

async fn countdown(app: &Lectern, lesson_id: &str, watch: bool) -> anyhow::Result<()> {
    lookup(app, lesson_id)?;
    if !watch {
        match app.countdown(lesson_id).map(|countdown| countdown.state()) {
            Some(CountdownState::Counting(left)) => println!("{left}"),
            Some(CountdownState::Released) => println!("Released"),
            None => println!("No scheduled release"),
        }
        return Ok(());
    }

    let Some(ticker) = app.countdown_ticker(lesson_id)? else {
        println!("No scheduled release");
        return Ok(());
    };
    let mut rx = ticker.subscribe();
    loop {
        let state = *rx.borrow_and_update();
        match state {
            CountdownState::Counting(left) => println!("{left}"),
            CountdownState::Released => {
                println!("Released");
                break;
            },
        }
        rx.changed().await.context("Countdown stopped")?;
    }
    Ok(())
}

async fn preview(app: &Lectern, count: usize, watch: bool) -> anyhow::Result<()> {
    if !watch {
        let mut rotation = app.preview_rotation();
        for _ in 0..count {
            let Some(preview) = rotation.next_preview() else {
                println!("No lessons with video");
                break;
            };
            println!("{} @{}s {}", preview.lesson_id, preview.start_secs, preview.url);
        }
        return Ok(());
    }

    let ticker = app.preview_ticker()?;
    let mut rx = ticker.subscribe();
    for drawn in 1..=count {
        let Some(preview) = rx.borrow_and_update().clone() else {
            println!("No lessons with video");
            break;
        };
        println!("{} @{}s {}", preview.lesson_id, preview.start_secs, preview.url);
        if drawn < count {
            rx.changed().await.context("Preview rotation stopped")?;
        }
    }
    Ok(())
}
