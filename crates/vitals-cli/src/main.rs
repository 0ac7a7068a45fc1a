mod commands;
mod config;
mod output;
mod telemetry;

use clap::{Parser, Subcommand};
use config::AppConfig;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "vitals",
    version,
    about = "Blood test evaluation and wellbeing scoring"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a blood test submission against reference ranges
    Lab {
        /// Path to the submission JSON (hemogram / biochemistry / vitamins)
        input_file: PathBuf,

        /// Custom reference range file (default: VITALS_REFERENCE or builtin)
        #[arg(short, long, value_name = "FILE")]
        reference: Option<PathBuf>,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,

        /// List every evaluated test with its value and range
        #[arg(long)]
        show_all: bool,
    },
    /// Score questionnaire answers
    Mood {
        /// Path to the responses JSON (question id -> option value)
        input_file: PathBuf,

        /// Custom questionnaire file (default: VITALS_QUESTIONNAIRE or builtin)
        #[arg(short, long, value_name = "FILE")]
        questionnaire: Option<PathBuf>,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,
    },
    /// Compute BMR, TDEE and a daily calorie target
    Energy {
        /// male or female
        #[arg(long)]
        sex: Option<String>,

        /// Age in years
        #[arg(long)]
        age: Option<u32>,

        /// Weight in kg
        #[arg(long)]
        weight: Option<Decimal>,

        /// Height in cm
        #[arg(long)]
        height: Option<Decimal>,

        /// sedentary, lightly_active, moderately_active, very_active, extra_active
        #[arg(long)]
        activity: Option<String>,

        /// lose_weight, maintain, gain_weight
        #[arg(long)]
        goal: Option<String>,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,
    },
    /// Summarize a day of logged meals
    Meals {
        /// Path to a JSON array of meals
        input_file: PathBuf,

        /// Daily calorie goal in kcal
        #[arg(long, value_name = "KCAL")]
        daily_goal: Option<Decimal>,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,
    },
    /// Suggest clinics for a complaint
    Referral {
        /// Complaint, e.g. "headache" (use "list" to see all complaints)
        complaint: String,

        /// City to tag each clinic with
        #[arg(long)]
        city: Option<String>,
    },
    /// Inspect reference range tables
    Reference {
        #[command(subcommand)]
        action: ReferenceAction,
    },
    /// Inspect questionnaires
    Questionnaire {
        #[command(subcommand)]
        action: QuestionnaireAction,
    },
}

#[derive(Subcommand)]
enum ReferenceAction {
    /// List the tests in the active reference table
    List,
    /// Explain the ranges and grouping of one category
    Explain {
        /// hemogram, biochemistry or vitamins
        category: String,
    },
    /// Validate a custom reference range file
    Validate {
        /// Path to JSON reference file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum QuestionnaireAction {
    /// Print the active questionnaire
    Show,
    /// Validate a custom questionnaire file
    Validate {
        /// Path to JSON questionnaire file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = telemetry::init(&config.telemetry) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let tables = &config.tables;
    let result = match cli.command {
        Commands::Lab {
            input_file,
            reference,
            output,
            show_all,
        } => commands::lab::run(input_file, reference, tables, &output, show_all),
        Commands::Mood {
            input_file,
            questionnaire,
            output,
        } => commands::mood::run(input_file, questionnaire, tables, &output),
        Commands::Energy {
            sex,
            age,
            weight,
            height,
            activity,
            goal,
            output,
        } => commands::energy::run(
            commands::energy::profile_from_args(sex, age, weight, height, activity, goal),
            &output,
        ),
        Commands::Meals {
            input_file,
            daily_goal,
            output,
        } => commands::meals::run(input_file, daily_goal, &output),
        Commands::Referral { complaint, city } => {
            commands::referral::run(&complaint, city.as_deref(), tables)
        }
        Commands::Reference { action } => match action {
            ReferenceAction::List => commands::reference::list(tables),
            ReferenceAction::Explain { category } => commands::reference::explain(&category, tables),
            ReferenceAction::Validate { file } => commands::reference::validate(&file),
        },
        Commands::Questionnaire { action } => match action {
            QuestionnaireAction::Show => commands::questionnaire::show(tables),
            QuestionnaireAction::Validate { file } => commands::questionnaire::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
