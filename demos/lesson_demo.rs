// Copyright 2025 Cowboy AI, LLC.

//! Lesson presenter demo
//!
//! This example shows:
//! - Declaring presentable domain types
//! - Passthrough and collection relations on a presenter
//! - Registering presenters in the global namespace
//! - Resolution failures for types without a presenter
//!
//! Run with `RUST_LOG=debug` to see resolution logging.

use anyhow::Result;
use cim_presenter::{presentable, presenter, AnyPresenter, PresenterRegistry};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Serialize)]
struct StepModule {
    kind: String,
    body: String,
}
presentable!(StepModule, serialize);

#[derive(Debug, Clone, Serialize)]
struct LessonStep {
    title: String,
    modules: Vec<StepModule>,
}
presentable!(LessonStep, serialize);

impl LessonStep {
    fn step_modules(&self) -> &[StepModule] {
        &self.modules
    }
}

#[derive(Debug, Clone, Serialize)]
struct Lesson {
    title: String,
    steps: Vec<LessonStep>,
}
presentable!(Lesson, serialize);

impl Lesson {
    fn lesson_steps(&self) -> &[LessonStep] {
        &self.steps
    }
}

presenter! {
    /// Renders a single module of a lesson step
    struct StepModulePresenter(StepModule) {}
}

impl StepModulePresenter {
    fn render_module(&self) -> String {
        format!("[{}] {}", self.kind, self.body)
    }
}

presenter! {
    struct LessonStepPresenter(LessonStep) {
        presents lesson_step;
        presents_many step_modules;
    }
}

presenter! {
    struct LessonPresenter(Lesson) {
        presents lesson;
        presents_many lesson_steps;
    }
}

fn sample_lesson() -> Lesson {
    Lesson {
        title: "Ownership".to_string(),
        steps: vec![
            LessonStep {
                title: "Moves".to_string(),
                modules: vec![
                    StepModule {
                        kind: "text".to_string(),
                        body: "Assignment moves a value".to_string(),
                    },
                    StepModule {
                        kind: "code".to_string(),
                        body: "let b = a;".to_string(),
                    },
                ],
            },
            LessonStep {
                title: "Borrows".to_string(),
                modules: vec![StepModule {
                    kind: "quiz".to_string(),
                    body: "Which borrow is mutable?".to_string(),
                }],
            },
        ],
    }
}

fn render(presenter: &LessonPresenter) -> Result<()> {
    println!("# {}", presenter.lesson().title);

    for step in presenter.lesson_steps()? {
        let step = step
            .downcast_ref::<LessonStepPresenter>()
            .ok_or_else(|| anyhow::anyhow!("unexpected presenter {}", step.presenter_name()))?;
        println!("## {}", step.title);

        for module in step.step_modules()? {
            if let Some(module) = module.downcast_ref::<StepModulePresenter>() {
                println!("   {}", module.render_module());
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Lesson Presenter Demo ===\n");

    let namespace = PresenterRegistry::global();
    namespace.register::<LessonStepPresenter>()?;

    let presenter = LessonPresenter::new(sample_lesson());

    // Step modules have no presenter yet
    match render(&presenter) {
        Ok(()) => println!("unexpected success"),
        Err(err) => println!("Before registering StepModulePresenter: {}\n", err),
    }

    namespace.register::<StepModulePresenter>()?;
    render(&presenter)?;

    // Undeclared calls fall through to the lesson itself
    let title = presenter.call("title")?;
    println!("\nForwarded `title`: {:?}", title.as_value());

    if let Err(err) = presenter.call("duration") {
        println!("Forwarded `duration`: {}", err);
    }

    println!("\nRegistered presenters: {:?}", namespace.registered_names());

    Ok(())
}
