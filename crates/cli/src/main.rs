use clap::{Parser, Subcommand};
use pms_core::{
    config::patient_data_file_from_env_value, BodyMassIndex, JsonFileStore, Patient,
    PatientService,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pms")]
#[command(about = "Patient Management System CLI")]
struct Cli {
    /// Patient data file (defaults to $PATIENT_DATA_FILE, then patients.json)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    List,
    /// Show one patient
    Show {
        /// Patient identifier
        id: String,
    },
    /// List patients sorted by height, weight or bmi
    Sort {
        /// Field to sort by
        sort_by: String,
        /// asc or desc
        #[arg(long)]
        order: Option<String>,
    },
    /// Compute BMI and verdict for a height (m) and weight (kg)
    Bmi { height: f64, weight: f64 },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let file = cli.file.unwrap_or_else(|| {
        patient_data_file_from_env_value(std::env::var("PATIENT_DATA_FILE").ok())
    });
    let service = PatientService::new(Arc::new(JsonFileStore::new(file)));

    match cli.command {
        Some(Commands::List) => {
            let patients = service.list()?;
            if patients.is_empty() {
                println!("No patients found.");
            } else {
                for (id, patient) in &patients {
                    println!("ID: {}, {}", id, describe(patient));
                }
            }
        }
        Some(Commands::Show { id }) => {
            let patient = service.get(&id)?;
            println!("ID: {}, {}", id, describe(&patient));
        }
        Some(Commands::Sort { sort_by, order }) => {
            for patient in service.sort(&sort_by, order.as_deref())? {
                println!("{}", describe(&patient));
            }
        }
        Some(Commands::Bmi { height, weight }) => {
            let bmi = BodyMassIndex::compute(height, weight)?;
            println!("BMI: {:.2} ({})", bmi.value(), bmi.verdict());
        }
        None => {
            println!("Use 'pms --help' for commands");
        }
    }

    Ok(())
}

fn describe(patient: &Patient) -> String {
    format!(
        "Name: {}, City: {}, Age: {}, Gender: {}, Height: {} m, Weight: {} kg, BMI: {:.2} ({})",
        patient.name(),
        patient.city(),
        patient.age(),
        patient.gender(),
        patient.height(),
        patient.weight(),
        patient.bmi(),
        patient.verdict()
    )
}
