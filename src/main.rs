use log::LevelFilter;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;
use sys_services::{logging, Sys, SysBuilder, SysConfig};

const USAGE: &str = "usage: sys-services [info | alert <title> <message> | open <url> | clipboard]";

fn main() -> ExitCode {
    let config = SysConfig::from_env();
    logging::init(if config.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let sys = match sys_services::init_global(SysBuilder::from_config(config)) {
        Ok(sys) => sys,
        Err(e) => {
            log::error!("[Sys] {}", e);
            return ExitCode::FAILURE;
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("info") => info(sys),
        Some("alert") => {
            sys.alert(args.get(1).map(String::as_str), args.get(2).map(String::as_str));
            ExitCode::SUCCESS
        }
        Some("open") => match args.get(1) {
            Some(url) if sys.open_url(url) => ExitCode::SUCCESS,
            Some(url) => {
                log::error!("[Sys] could not open {}", url);
                ExitCode::FAILURE
            }
            None => usage(),
        },
        Some("clipboard") => match sys.clipboard() {
            Some(text) => {
                println!("{}", text);
                ExitCode::SUCCESS
            }
            None => {
                log::warn!("[Sys] no clipboard available");
                ExitCode::FAILURE
            }
        },
        Some(_) => usage(),
    }
}

fn info(sys: &Sys) -> ExitCode {
    println!("version:    {}", sys.version());
    println!("backend:    {}", sys.family());

    let resolution = sys.timer_resolution();
    if resolution == 0 {
        println!("timer:      unavailable");
        return ExitCode::SUCCESS;
    }
    println!("timer:      {} ticks/s", resolution);

    let first = sys.time();
    thread::sleep(Duration::from_millis(10));
    let second = sys.time();
    let delta = Sys::time_delta(first, second);
    println!("10ms sleep: {} ticks ({:?})", delta, sys.ticks_to_duration(delta));
    ExitCode::SUCCESS
}

fn usage() -> ExitCode {
    eprintln!("{}", USAGE);
    ExitCode::from(2)
}
