//! The `gradquest init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create gradquest.toml
    if std::path::Path::new("gradquest.toml").exists() {
        println!("gradquest.toml already exists, skipping.");
    } else {
        std::fs::write("gradquest.toml", SAMPLE_CONFIG)?;
        println!("Created gradquest.toml");
    }

    // Create sample question files
    std::fs::create_dir_all("questions")?;
    for (name, content) in SAMPLE_QUESTION_FILES {
        let path = std::path::Path::new("questions").join(name);
        if path.exists() {
            println!("{} already exists, skipping.", path.display());
        } else {
            std::fs::write(&path, content)?;
            println!("Created {}", path.display());
        }
    }

    println!("\nNext steps:");
    println!("  1. Add your own questions to the files under questions/");
    println!("  2. Run: gradquest validate --questions questions");
    println!("  3. Run: gradquest play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradquest configuration

questions_dir = "./questions"
report_dir = "./gradquest-reports"

# Question file names, one per archetype slot.
question_files = [
    "software_engineering.csv",
    "calculus.csv",
    "world_history.csv",
    "organic_chemistry.csv",
]
"#;

const SAMPLE_QUESTION_FILES: [(&str, &str); 4] = [
    (
        "software_engineering.csv",
        "\
What does SDLC stand for?,Software Development Life Cycle
Which model arranges phases in a strict linear order?,Waterfall
What does a unit test exercise?,A single component in isolation
Which practice merges every change into a shared trunk daily?,Continuous integration
What is the name for a design flaw that invites bugs?,Code smell
Which document captures what a system must do?,Requirements specification
",
    ),
    (
        "calculus.csv",
        "\
What is the derivative of x^2?,2x
What is the integral of 1/x?,ln|x| + C
What is the limit of sin(x)/x as x approaches 0?,1
What rule differentiates a product of two functions?,Product rule
What is the derivative of a constant?,0
What is the second derivative of position with respect to time?,Acceleration
",
    ),
    (
        "world_history.csv",
        "\
In what year did the Berlin Wall fall?,1989
Which empire built the Colosseum?,The Roman Empire
Who was the first president of the United States?,George Washington
Which war ended with the Treaty of Versailles?,World War I
What ancient civilization built Machu Picchu?,The Inca
In what year did the French Revolution begin?,1789
",
    ),
    (
        "organic_chemistry.csv",
        "\
What is the simplest alkane?,Methane
What functional group defines an alcohol?,Hydroxyl
How many bonds does carbon typically form?,4
What is the general formula for alkenes?,CnH2n
Which isomerism arises from a double bond's geometry?,Cis-trans isomerism
What reaction joins monomers into a polymer?,Polymerization
",
    ),
];
