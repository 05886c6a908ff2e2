//! Command-line interface

use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use uuid::Uuid;

use shared::models::{GALLERY_CATEGORIES, SERVICE_CATEGORIES};

use crate::session::DEFAULT_SESSION_FILE;

#[derive(Debug, Parser)]
#[command(
    name = "salon-admin",
    about = "Manage the salon website: services, gallery, opening hours, site text and contact details",
    version
)]
pub struct Cli {
    /// Where the signed-in session is kept between runs
    #[arg(long, env = "SALON_SESSION_FILE", default_value = DEFAULT_SESSION_FILE, global = true)]
    pub session_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with email and password
    Login {
        #[arg(long, env = "SALON_ADMIN_EMAIL")]
        email: String,
        #[arg(long, env = "SALON_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show who is signed in
    Status,
    /// Services offered by the salon
    #[command(subcommand)]
    Services(ServicesCommand),
    /// Gallery images
    #[command(subcommand)]
    Gallery(GalleryCommand),
    /// Weekly opening hours
    #[command(subcommand)]
    Hours(HoursCommand),
    /// Editable site text
    #[command(subcommand)]
    Content(ContentCommand),
    /// Contact details
    #[command(subcommand)]
    Contact(ContactCommand),
    /// Print the public page as plain text
    Site {
        /// Gallery slide to show, counted from 0 and wrapping past the last
        #[arg(long, default_value_t = 0)]
        slide: usize,
    },
}

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    /// List services (active only unless --all)
    List {
        #[arg(long)]
        all: bool,
    },
    /// Add a service
    Add(ServiceArgs),
    /// Edit a service; omitted fields are left unchanged
    Edit {
        id: Uuid,
        #[command(flatten)]
        fields: ServiceEditArgs,
    },
    /// Delete a service
    Remove { id: Uuid },
}

#[derive(Debug, Args)]
pub struct ServiceArgs {
    #[arg(long)]
    pub name: String,
    /// Starting price in euros
    #[arg(long)]
    pub price: Decimal,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(
        long,
        default_value = shared::models::DEFAULT_SERVICE_CATEGORY,
        value_parser = PossibleValuesParser::new(SERVICE_CATEGORIES.iter().copied())
    )]
    pub category: String,
    #[arg(long, default_value = shared::models::DEFAULT_SERVICE_ICON)]
    pub icon: String,
    #[arg(long, default_value_t = 0)]
    pub order: i32,
    /// Create the service hidden from the public page
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Debug, Args)]
pub struct ServiceEditArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub price: Option<Decimal>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, value_parser = PossibleValuesParser::new(SERVICE_CATEGORIES.iter().copied()))]
    pub category: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long)]
    pub order: Option<i32>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Debug, Subcommand)]
pub enum GalleryCommand {
    List,
    /// Upload an image file and add it to the gallery
    Upload {
        file: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(
            long,
            default_value = shared::models::DEFAULT_GALLERY_CATEGORY,
            value_parser = PossibleValuesParser::new(GALLERY_CATEGORIES.iter().copied())
        )]
        category: String,
        #[arg(long)]
        featured: bool,
        #[arg(long, default_value_t = 0)]
        order: i32,
    },
    /// Edit an image's details; omitted fields are left unchanged
    Edit {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = PossibleValuesParser::new(GALLERY_CATEGORIES.iter().copied()))]
        category: Option<String>,
        #[arg(long)]
        featured: Option<bool>,
        #[arg(long)]
        order: Option<i32>,
    },
    /// Remove an image from the gallery (the stored file is kept)
    Remove { id: Uuid },
}

#[derive(Debug, Subcommand)]
pub enum HoursCommand {
    List,
    /// Open a day
    Open {
        /// 0-6 (0 = Sunday) or an English day name
        #[arg(value_parser = parse_day)]
        day: u8,
        #[arg(long, default_value = shared::models::DEFAULT_OPENING_TIME)]
        from: String,
        #[arg(long, default_value = shared::models::DEFAULT_CLOSING_TIME)]
        to: String,
    },
    /// Close a day
    Close {
        #[arg(value_parser = parse_day)]
        day: u8,
    },
}

#[derive(Debug, Subcommand)]
pub enum ContentCommand {
    /// Every editable field with its current text
    List,
    Get { section: String, key: String },
    Set {
        section: String,
        key: String,
        value: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    Show,
    /// Set contact details; omitted fields are left unchanged
    Set {
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
}

/// Accept `0`..`6` or a day name such as `monday` / `Mon`
pub fn parse_day(value: &str) -> Result<u8, String> {
    if let Ok(day) = value.parse::<u8>() {
        return Ok(day);
    }
    let lower = value.to_lowercase();
    shared::schedule::DAY_NAMES
        .iter()
        .position(|name| {
            let name = name.to_lowercase();
            name == lower || (lower.len() >= 3 && name.starts_with(&lower))
        })
        .map(|i| i as u8)
        .ok_or_else(|| format!("'{value}' is not a day (use 0-6 or a day name)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(parse_day("0"), Ok(0));
        assert_eq!(parse_day("Monday"), Ok(1));
        assert_eq!(parse_day("sat"), Ok(6));
        // out of range numbers pass through; the store rejects them
        assert_eq!(parse_day("9"), Ok(9));
        assert!(parse_day("mo").is_err());
        assert!(parse_day("someday").is_err());
    }

    #[test]
    fn test_parse_services_add() {
        let cli = Cli::try_parse_from([
            "salon-admin",
            "services",
            "add",
            "--name",
            "Coupe Homme",
            "--price",
            "25",
            "--category",
            "coupe",
        ])
        .unwrap();
        match cli.command {
            Command::Services(ServicesCommand::Add(args)) => {
                assert_eq!(args.name, "Coupe Homme");
                assert_eq!(args.price, Decimal::new(25, 0));
                assert_eq!(args.icon, "Scissors");
                assert!(!args.inactive);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_categories_are_rejected() {
        let err = Cli::try_parse_from([
            "salon-admin",
            "services",
            "add",
            "--name",
            "X",
            "--price",
            "1",
            "--category",
            "bogus",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);

        let err = Cli::try_parse_from([
            "salon-admin",
            "gallery",
            "upload",
            "f.png",
            "--title",
            "T",
            "--category",
            "bogus",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);

        // a service category is not a gallery category
        assert!(
            Cli::try_parse_from([
                "salon-admin",
                "gallery",
                "edit",
                "6f1c1d2e-3a4b-4c5d-8e9f-0a1b2c3d4e5f",
                "--category",
                "coupe",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_category_defaults() {
        let cli =
            Cli::try_parse_from(["salon-admin", "gallery", "upload", "f.png", "--title", "T"])
                .unwrap();
        match cli.command {
            Command::Gallery(GalleryCommand::Upload { category, .. }) => {
                assert_eq!(category, "salon")
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from([
            "salon-admin",
            "services",
            "edit",
            "6f1c1d2e-3a4b-4c5d-8e9f-0a1b2c3d4e5f",
            "--category",
            "soins",
        ])
        .unwrap();
        match cli.command {
            Command::Services(ServicesCommand::Edit { fields, .. }) => {
                assert_eq!(fields.category.as_deref(), Some("soins"))
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
