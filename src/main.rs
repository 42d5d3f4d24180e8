//! Menu-driven terminal front end for the car simulation.

use std::io::{self, stdout, BufRead, Write};
use std::process;

use car_sim::car::slot_color;
use car_sim::{Direction, Simulation};
use crossterm::{
    execute,
    style::{Color, Print, SetForegroundColor},
};
use regex::Regex;

fn main() {
    println!("\nWelcome to Auto Driving Car Simulation!");

    let mut simulation = prompt_grid();

    loop {
        show_menu(&simulation);

        match read_line("").as_str() {
            "1" => {
                simulation = prompt_grid();
            }
            "2" => prompt_add_car(&mut simulation),
            "3" => run_simulation(&mut simulation),
            "4" => {
                simulation.reset();
                println!("\nSimulation reset - the field is kept, please add new cars!");
            }
            "5" => break,
            _ => println!("\nInvalid input, select between options 1-5."),
        }
    }

    println!("\nThank you for running the simulation. Goodbye!");
}

fn show_menu(simulation: &Simulation) {
    println!("\nPlease choose from the following options:");
    println!("\n[1] Define a new field (clears all cars)");
    println!("[2] Add a car to field");
    println!(
        "[3] Run simulation{}",
        match simulation.cars().is_empty() {
            true => " (Warning - No cars added yet)",
            false => "",
        }
    );
    println!("[4] Reset simulation (keep field, clear cars)");
    println!("[5] Exit simulation");
}

/// Prompts until a valid field is defined and returns a fresh simulation.
fn prompt_grid() -> Simulation {
    let format = Regex::new(r"^(-?\d+)\s+(-?\d+)$").unwrap();

    loop {
        let line = read_line(
            "\nPlease enter the width and height of the simulation field in `width height` format: ",
        );

        let Some(captures) = format.captures(&line) else {
            println!("Invalid input. Please enter exactly two integer values: width height.");
            continue;
        };
        let (Ok(width), Ok(height)) = (captures[1].parse::<i64>(), captures[2].parse::<i64>())
        else {
            println!("Invalid input. Please enter exactly two integer values: width height.");
            continue;
        };

        match Simulation::new(width, height) {
            Ok(simulation) => {
                println!("\nYou have created a field of {} x {}.", width, height);
                return simulation;
            }
            Err(error) => println!("{}", error),
        }
    }
}

/// Prompts for a car's name, position and commands, re-prompting each stage
/// until its input is valid, then registers the car.
fn prompt_add_car(simulation: &mut Simulation) {
    let name = loop {
        let name = read_line("\nPlease enter the name of the car: ");

        if name.is_empty() {
            println!("Car names cannot be empty.");
            continue;
        }
        if simulation.cars().iter().any(|car| car.name() == name) {
            println!(
                "There is already a car named {}. Please input a different car name.",
                name
            );
            continue;
        }

        break name;
    };

    let position_format = Regex::new(r"^(-?\d+)\s+(-?\d+)\s+([NSEW])$").unwrap();
    let (x, y, facing) = loop {
        let line = read_line(&format!(
            "\nPlease enter initial position of car {} in `x y direction` format: ",
            name
        ));

        let Some(captures) = position_format.captures(&line) else {
            println!(
                "Invalid input. Please enter two integers followed by a direction (N, S, E or W)."
            );
            continue;
        };
        let (Ok(x), Ok(y)) = (captures[1].parse::<i64>(), captures[2].parse::<i64>()) else {
            println!(
                "Invalid input. Please enter two integers followed by a direction (N, S, E or W)."
            );
            continue;
        };
        let Some(facing) = captures[3].chars().next().and_then(Direction::from_char) else {
            continue;
        };

        match simulation.validate_position(x, y) {
            Ok(()) => break (x, y, facing),
            Err(error) => println!("{}", error),
        }
    };

    loop {
        let commands = read_line(&format!("\nPlease enter the commands for car {}: ", name));

        match simulation.add_car(&name, x, y, facing, &commands) {
            Ok(()) => break,
            Err(error) => println!("{}", error),
        }
    }

    show_cars(simulation, true);
}

fn run_simulation(simulation: &mut Simulation) {
    if simulation.cars().is_empty() {
        println!("\nNo cars added to the simulation. Please add at least one car before running.");
        return;
    }

    show_cars(simulation, false);
    let reports = simulation.run();

    println!("\nAfter simulation, the result is:");
    let mut stdout = stdout();
    for (slot, report) in reports.iter().enumerate() {
        let line = match &report.collision {
            Some(record) => {
                let others = record
                    .cars
                    .iter()
                    .filter(|other| **other != report.name)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "- {}, collides with {} at ({}, {}) at tick {}.",
                    report.name, others, record.location.0, record.location.1, record.tick
                )
            }
            None => format!(
                "- {}, ({}, {}) {}",
                report.name,
                report.position.0,
                report.position.1,
                report.facing.as_char()
            ),
        };

        execute!(
            stdout,
            SetForegroundColor(slot_color(slot)),
            Print(line),
            Print("\n"),
            SetForegroundColor(Color::Reset)
        )
        .unwrap();
    }

    println!();
    simulation.grid().draw(simulation.cars());
}

fn show_cars(simulation: &Simulation, show_commands: bool) {
    if simulation.cars().is_empty() {
        return;
    }

    println!("\nYour current list of cars are:");
    let mut stdout = stdout();
    for (slot, car) in simulation.cars().iter().enumerate() {
        let (x, y) = car.position();
        let mut line = format!("- {}, ({}, {}) {}", car.name(), x, y, car.facing().as_char());
        if show_commands {
            line.push_str(", commands: ");
            line.extend(car.commands().iter().map(|command| command.as_char()));
        }

        execute!(
            stdout,
            SetForegroundColor(slot_color(slot)),
            Print(line),
            Print("\n"),
            SetForegroundColor(Color::Reset)
        )
        .unwrap();
    }
}

/// Prints a prompt and reads one trimmed line from stdin, exiting cleanly on
/// end of input.
fn read_line(prompt: &str) -> String {
    let mut stdout = stdout();
    execute!(stdout, Print(prompt)).unwrap();
    stdout.flush().unwrap();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => {
            println!("\nThank you for running the simulation. Goodbye!");
            process::exit(0);
        }
        Ok(_) => line.trim().to_string(),
    }
}
