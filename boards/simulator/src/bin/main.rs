#[macro_use]
extern crate log;

use std::io::BufRead;

use env_logger::Env;
use servo_faces::config::{pathset, Config};

fn config<'a>(matches: &'a clap::ArgMatches<'a>) -> Result<Config, String> {
    let mut config = Config::default();
    if let Some(calibration) = matches.value_of("calibration") {
        config.calibration =
            calibration.parse().map_err(|_| format!("Unknown calibration {}", calibration))?;
    }
    for assignment in matches.values_of("set").into_iter().flatten() {
        pathset::apply(&mut config, assignment).map_err(|e| format!("{}: {}", assignment, e))?;
    }
    Ok(config)
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let matches = clap::App::new("simulator")
        .version("0.1")
        .author("qiuchengxuan")
        .about("Servo faces simulator, reads commands from arguments or stdin")
        .arg(
            clap::Arg::with_name("calibration")
                .long("calibration")
                .help("narrow, wide or <min>,<max>")
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("set")
                .long("set")
                .help("Config assignment, e.g. motion.step-degrees=5")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1),
        )
        .arg(clap::Arg::with_name("commands").help("Command lines").multiple(true))
        .get_matches();

    let config = match config(&matches) {
        Ok(config) => config,
        Err(error) => {
            println!("{}", error);
            return;
        }
    };
    info!("Config {:?}", config);
    let mut simulator = simulator::build(&config);

    let lines: Box<dyn Iterator<Item = String>> = match matches.values_of("commands") {
        Some(commands) => Box::new(commands.map(String::from).collect::<Vec<_>>().into_iter()),
        None => Box::new(std::io::stdin().lock().lines().map_while(Result::ok)),
    };
    for line in lines.filter(|line| !line.trim().is_empty()) {
        if let Err(error) = simulator::run(&mut simulator, &line) {
            println!("{}", error);
        }
    }
}
