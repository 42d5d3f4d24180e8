use serde_json::json;
use std::{fs::File, io::BufWriter};

pub fn create_run_logger(
    filename: Option<String>,
    grid_width: i64,
    grid_height: i64,
) -> Box<dyn RunLogger> {
    match filename {
        None => Box::new(NoOpRunLogger {}),
        Some(filename) => Box::new(JsonRunLogger::new(filename, grid_width, grid_height)),
    }
}

pub trait RunLogger {
    #[allow(unused_variables)]
    fn log_add_car(&mut self, name: &str, location: (i64, i64), facing: char) {}

    #[allow(unused_variables)]
    fn log_turn(&mut self, tick: usize, name: &str, location: (i64, i64), facing: char) {}

    #[allow(unused_variables)]
    fn log_move(&mut self, tick: usize, name: &str, from: (i64, i64), to: (i64, i64)) {}

    #[allow(unused_variables)]
    fn log_rejected(&mut self, tick: usize, name: &str, location: (i64, i64)) {}

    #[allow(unused_variables)]
    fn log_collision(&mut self, tick: usize, location: (i64, i64), cars: Vec<String>) {}

    fn clear(&mut self) {}

    fn save(&self) {}
}

#[derive(serde::Serialize)]
enum EventType {
    AddCar,
    Turn,
    Move,
    Rejected,
    Collision,
}

#[derive(serde::Serialize)]
struct Event {
    event_type: EventType,
    tick: usize,
    cars: Vec<String>,
    location: (i64, i64),
    destination: Option<(i64, i64)>,
    facing: Option<char>,
}

struct NoOpRunLogger;
impl RunLogger for NoOpRunLogger {}

struct JsonRunLogger {
    filename: String,
    grid_width: i64,
    grid_height: i64,
    events: Vec<Event>,
}

impl JsonRunLogger {
    pub fn new(filename: String, grid_width: i64, grid_height: i64) -> Self {
        JsonRunLogger {
            filename,
            grid_width,
            grid_height,
            events: Vec::new(),
        }
    }
}

impl RunLogger for JsonRunLogger {
    fn log_add_car(&mut self, name: &str, location: (i64, i64), facing: char) {
        self.events.push(Event {
            event_type: EventType::AddCar,
            tick: 0,
            cars: vec![name.to_string()],
            location,
            destination: None,
            facing: Some(facing),
        });
    }

    fn log_turn(&mut self, tick: usize, name: &str, location: (i64, i64), facing: char) {
        self.events.push(Event {
            event_type: EventType::Turn,
            tick,
            cars: vec![name.to_string()],
            location,
            destination: None,
            facing: Some(facing),
        });
    }

    fn log_move(&mut self, tick: usize, name: &str, from: (i64, i64), to: (i64, i64)) {
        self.events.push(Event {
            event_type: EventType::Move,
            tick,
            cars: vec![name.to_string()],
            location: from,
            destination: Some(to),
            facing: None,
        });
    }

    fn log_rejected(&mut self, tick: usize, name: &str, location: (i64, i64)) {
        self.events.push(Event {
            event_type: EventType::Rejected,
            tick,
            cars: vec![name.to_string()],
            location,
            destination: None,
            facing: None,
        });
    }

    fn log_collision(&mut self, tick: usize, location: (i64, i64), cars: Vec<String>) {
        self.events.push(Event {
            event_type: EventType::Collision,
            tick,
            cars,
            location,
            destination: None,
            facing: None,
        });
    }

    fn clear(&mut self) {
        self.events.clear();
    }

    fn save(&self) {
        let file = File::create(&self.filename).unwrap();
        let data = json!({
            "grid": {
                "width": self.grid_width,
                "height": self.grid_height,
            },
            "events": self.events,
        });

        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, &data).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn when_saving_a_json_run_log_the_grid_and_events_are_written() {
        let filename = env::temp_dir().join("car_sim_run_logger_test.json");
        let filename = filename.to_str().unwrap().to_string();

        let mut logger = JsonRunLogger::new(filename.clone(), 4, 3);
        logger.log_add_car("A", (0, 0), 'N');
        logger.log_move(1, "A", (0, 0), (0, 1));
        logger.log_rejected(2, "A", (0, 1));
        logger.log_collision(3, (0, 1), vec!["A".to_string(), "B".to_string()]);
        logger.save();

        let contents = fs::read_to_string(&filename).unwrap();
        let data: serde_json::Value = serde_json::from_str(&contents).unwrap();

        assert_eq!(data["grid"]["width"], 4);
        assert_eq!(data["grid"]["height"], 3);
        assert_eq!(data["events"].as_array().unwrap().len(), 4);
        assert_eq!(data["events"][3]["event_type"], "Collision");
        assert_eq!(data["events"][3]["cars"][1], "B");

        fs::remove_file(&filename).unwrap();
    }
}
