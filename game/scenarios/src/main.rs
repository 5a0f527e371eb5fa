use std::io::Write;
use std::path::PathBuf;

use argh::FromArgs;
use common::*;
use config::ConfigType;
use logging::LoggerBuilder;
use scenarios::{all_names, current_tick, next_tick, resolve, Scenario};
use steering::Steerable;

/// Runs a steering scenario headless, logging agent positions as it goes
#[derive(FromArgs)]
struct Args {
    /// scenario to run, see --list
    #[argh(option, short = 's')]
    scenario: Option<String>,

    /// RON config file, defaults are used without one
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// number of ticks to run for
    #[argh(option, short = 'n', default = "600")]
    ticks: u64,

    /// reload the config file when it changes
    #[argh(switch, short = 'w')]
    watch: bool,

    /// list available scenarios and exit
    #[argh(switch)]
    list: bool,

    /// print the default config and exit
    #[argh(switch)]
    dump_config: bool,
}

fn do_main(args: Args) -> BoxedResult<()> {
    if args.list {
        for name in all_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    if args.dump_config {
        println!("{}", config::dump(&config::Config::default())?);
        return Ok(());
    }

    // load config
    match (&args.config, args.watch) {
        (Some(path), true) => {
            info!("loading config and watching for changes"; "path" => %path.display());
            config::init(ConfigType::WatchedFile(path))?;
        }
        (Some(path), false) => {
            info!("loading config"; "path" => %path.display());
            let contents = std::fs::read_to_string(path)?;
            config::init(ConfigType::String(&contents))?;
        }
        (None, watch) => {
            if watch {
                warn!("no config file to watch, using defaults");
            }
            config::init(ConfigType::String("()"))?;
        }
    }

    let (name, constructor) = resolve(args.scenario.as_deref())
        .ok_or_else(|| {
            format!(
                "unknown scenario {:?}, expected one of: {}",
                args.scenario,
                all_names().join(", ")
            )
        })?;

    let mut scenario = {
        let config = config::get();
        constructor(&*config)?
    };
    info!("running scenario"; "scenario" => name, "ticks" => args.ticks);

    let ticks_per_second = config::get().simulation.ticks_per_second.max(1);
    let dt = 1.0 / ticks_per_second as f32;

    for _ in 0..args.ticks {
        scenario.tick(dt);
        let tick = next_tick();

        if tick % u64::from(ticks_per_second) == 0 {
            if args.watch {
                scenario.retune(&*config::get());
            }

            log_agents(&*scenario);
        }
    }

    info!("finished"; "ticks" => current_tick());
    Ok(())
}

fn log_agents(scenario: &dyn Scenario) {
    for (i, agent) in scenario.agents().iter().enumerate() {
        let agent = agent.borrow();
        debug!("agent";
            "index" => i,
            "position" => ?agent.position(),
            "velocity" => ?agent.linear_velocity(),
            "orientation" => agent.orientation()
        );
    }
}

fn main() {
    let args: Args = argh::from_env();

    let logger = LoggerBuilder::with_env().and_then(|builder| {
        builder.init(|w: &mut dyn Write| write!(w, "T{:05}", current_tick()))
    });
    let logger = match logger {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("failed to initialise logging: {}", e);
            std::process::exit(1);
        }
    };

    let exit = match do_main(args) {
        Err(e) => {
            error!("error"; "error" => %e);

            let mut src = e.source();
            while let Some(source) = src {
                error!(" caused by"; "source" => %source);
                src = source.source();
            }

            1
        }
        Ok(()) => 0,
    };

    info!("exiting cleanly"; "exit_code" => exit);

    // flush logs
    drop(logger);
    std::process::exit(exit);
}
