// Demonstration: fly a kinematic toy drone to a target through a sphere field.
//
// Build/run from this repo root:
//   RUST_LOG=navcore=debug cargo run --example chase_target -- --policy heading --max-ticks 5000

use std::env;

use nalgebra::{Point3, Rotation3, Unit, Vector3};

use navcore::geometry::world_up;
use navcore::nav::{
    Actuator, DecisionScheduler, HeadingPolicy, NavConfig, Policy, RandomPolicy, SensorBackend,
    SphereField, StaticTarget, TickOutcome,
};

/// Fixed physics step, seconds.
const DT: f64 = 0.02;

/// Point-mass drone that turns instantly and flies along its heading.
struct ToyDrone {
    position: Point3<f64>,
    heading: Unit<Vector3<f64>>,
    lateral: Vector3<f64>,
    speed: f64,
}

impl ToyDrone {
    fn new(position: Point3<f64>) -> Self {
        let mut drone = Self {
            position,
            heading: Vector3::z_axis(),
            lateral: Vector3::zeros(),
            speed: 0.0,
        };
        drone.refresh_axes();
        drone
    }

    fn integrate(&mut self) {
        self.position += self.heading.into_inner() * self.speed * DT;
    }
}

impl Actuator for ToyDrone {
    fn current_position(&self) -> Point3<f64> {
        self.position
    }

    fn current_heading(&self) -> Unit<Vector3<f64>> {
        self.heading
    }

    fn current_speed(&self) -> f64 {
        self.speed
    }

    fn apply_motion(&mut self, yaw_deg: f64, pitch_deg: f64, speed: f64) {
        let yaw = Rotation3::from_axis_angle(&world_up(), yaw_deg.to_radians());
        let pitch = match Unit::try_new(self.lateral, 1e-9) {
            Some(axis) => Rotation3::from_axis_angle(&axis, pitch_deg.to_radians()),
            None => Rotation3::identity(),
        };
        self.heading = Unit::new_normalize(yaw * pitch * self.heading.into_inner());
        self.speed = speed;
    }

    fn refresh_axes(&mut self) {
        self.lateral = self.heading.cross(&world_up().into_inner());
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let policy_name = arg_value(&args, "--policy").unwrap_or("heading");
    let max_ticks: u64 = arg_value(&args, "--max-ticks")
        .and_then(|s| s.parse().ok())
        .unwrap_or(5000);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let policy: Box<dyn Policy> = match policy_name {
        "heading" => Box::new(HeadingPolicy::default()),
        "random" => Box::new(RandomPolicy::new(seed)),
        other => {
            eprintln!("Unknown --policy '{}'; expected 'heading' or 'random'.", other);
            std::process::exit(2);
        }
    };

    let mut field = SphereField::default();
    field.add(Point3::new(4.0, 0.0, 12.0), 1.5);
    field.add(Point3::new(14.0, 3.0, 18.0), 2.0);

    let target = Point3::new(20.0, 5.0, 30.0);
    let mut scheduler = match DecisionScheduler::new(
        NavConfig::default(),
        SensorBackend::Rays(Box::new(field)),
        Box::new(StaticTarget::new(target)),
        policy,
    ) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut drone = ToyDrone::new(Point3::origin());
    scheduler.reset(&mut drone);

    let mut reached_at = None;
    for tick in 1..=max_ticks {
        if let TickOutcome::Decided(command) = scheduler.tick(&mut drone) {
            if tick % 50 == 0 {
                println!(
                    "tick {:>5}: at ({:6.2}, {:6.2}, {:6.2}) -> {}",
                    tick, drone.position.x, drone.position.y, drone.position.z, command
                );
            }
        }
        drone.integrate();

        if scheduler.has_reached_target(&drone) {
            reached_at = Some(tick);
            break;
        }
    }

    println!("Policy: {}", scheduler.policy_name());
    match reached_at {
        Some(tick) => println!("Target reached after {} ticks", tick),
        None => println!(
            "Target not reached in {} ticks (distance {:.2})",
            max_ticks,
            (target - drone.position).norm()
        ),
    }
    println!("{}", scheduler.stats());
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
