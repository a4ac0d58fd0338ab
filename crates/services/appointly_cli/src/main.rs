// File: services/appointly_cli/src/main.rs
use appointly_client::{
    AdminSession, AppointmentListing, BookingError, BookingFlow, BookingForm,
    RestAppointmentService, TABLE_COLUMNS,
};
use appointly_common::{logging, AppointlyError, LookupOutcome};
use appointly_config::{load_config, AppConfig};
use appointly_slots::{Availability, GridSpec, SlotEngine};
use std::env;
use std::sync::Arc;

const USAGE: &str = "\
Usage: appointly <command> [args]

Commands:
  branches                                         list branches
  slots <branch> <date>                            free time slots
  fully-booked <branch>                            dates without free slots
  book <name> <branch> <date> <time> <email> <cellphone>
  lookup <password> <code>                         find an appointment (admin)
  list <password> [filter] [page]                  list appointments (admin)";

#[tokio::main]
async fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config: {}", err);
            std::process::exit(1);
        }
    };
    logging::init_with_level(logging::level_from_str(&config.logging.level));

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        println!("{}", USAGE);
        return;
    }

    let command = args[0].as_str();
    let result = logging::log_result(
        run(&config, &args).await,
        &format!("Command '{}' completed", command),
        &format!("Command '{}' failed", command),
    );
    if let Err(err) = result {
        eprintln!("Error: {}", err.user_message());
        std::process::exit(1);
    }
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str, AppointlyError> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| {
            appointly_common::validation_error(format!("missing <{}>\n\n{}", name, USAGE))
        })
}

async fn run(config: &AppConfig, args: &[String]) -> Result<(), AppointlyError> {
    let service = Arc::new(RestAppointmentService::from_config(&config.api, AdminSession::new())?);
    let grid = GridSpec::try_from(&config.slots)?;

    match args[0].as_str() {
        "branches" => {
            for branch in service.list_branches().await? {
                println!("{}", branch);
            }
        }
        "slots" => {
            let mut engine = SlotEngine::new(service, grid);
            let availability = engine
                .get_availability(arg(args, 1, "branch")?, arg(args, 2, "date")?)
                .await?;
            print_availability(&availability);
        }
        "fully-booked" => {
            for date in service.fully_booked_dates(arg(args, 1, "branch")?).await? {
                println!("{}", date);
            }
        }
        "book" => {
            let form = BookingForm {
                customer_name: arg(args, 1, "name")?.to_string(),
                branch: arg(args, 2, "branch")?.to_string(),
                date: arg(args, 3, "date")?.to_string(),
                time_slot: arg(args, 4, "time")?.to_string(),
                email: arg(args, 5, "email")?.to_string(),
                cellphone: arg(args, 6, "cellphone")?.to_string(),
            };
            let mut flow = BookingFlow::new(SlotEngine::new(service, grid));
            match flow.submit(&form).await {
                Ok(outcome) => {
                    println!("Appointment booked successfully!");
                    println!("Confirmation Code: {}", outcome.confirmation.confirmation_code);
                    if let Some(availability) = outcome.refreshed {
                        print_availability(&availability);
                    }
                }
                Err(BookingError::SlotTaken { message, refreshed }) => {
                    if let Some(availability) = refreshed {
                        print_availability(&availability);
                    }
                    return Err(appointly_common::conflict(message));
                }
                Err(BookingError::Request(err)) => return Err(err),
            }
        }
        "lookup" => {
            service.admin_login(arg(args, 1, "password")?).await?;
            match service.lookup_appointment(arg(args, 2, "code")?).await? {
                LookupOutcome::Found(appointment) => {
                    print_rows(&[appointly_client::appointment_row(&appointment)]);
                }
                LookupOutcome::Message(text) => println!("{}", text),
            }
        }
        "list" => {
            service.admin_login(arg(args, 1, "password")?).await?;
            let mut listing = AppointmentListing::new(config.admin.page_size);
            listing.load(service.list_appointments().await?);
            if let Some(filter) = args.get(2) {
                listing.set_filter(filter);
            }
            if let Some(page) = args.get(3) {
                let page = page.parse().map_err(|_| {
                    appointly_common::validation_error(format!("invalid page '{}'", page))
                })?;
                listing.go_to(page);
            }
            print_rows(&listing.page_rows());
            println!("Page {} of {}", listing.current_page(), listing.total_pages().max(1));
        }
        other => {
            return Err(appointly_common::validation_error(format!(
                "unknown command '{}'\n\n{}",
                other, USAGE
            )))
        }
    }
    Ok(())
}

fn print_availability(availability: &Availability) {
    match availability {
        Availability::SelectionIncomplete => println!("Select a branch and date first"),
        Availability::Slots(slots) if slots.is_empty() => println!("No slots available"),
        Availability::Slots(slots) => {
            for slot in slots {
                println!("{}  {}", slot, slot.to_display());
            }
        }
    }
}

fn print_rows(rows: &[[String; 7]]) {
    println!("{}", TABLE_COLUMNS.join(" | "));
    for row in rows {
        println!("{}", row.join(" | "));
    }
}
