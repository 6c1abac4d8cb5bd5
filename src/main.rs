#![deny(rust_2018_idioms)]

use argh::{EarlyExit, FromArgs};
use htc_charge::{error, info, ChargeMode, Error, Selector};
use rusb::{Context, UsbContext};
use std::{env, process};

/// Exit status for an invalid command line.
const EXIT_USAGE: i32 = 100;
/// Short flags that may be combined, as in `-0V`.
const SHORT_FLAGS: &str = "0hV";

/// HTC USB charging control utility.
#[derive(FromArgs)]
#[argh(
    help_triggers("-h", "--help"),
    example = "Enable charging on all connected HTC devices:\n  $ {command_name}",
    example = "Disable charging on the HTC device on bus 4, device 14:\n  $ BUSNUM=004 DEVNUM=014 {command_name} --off",
    note = "When BUSNUM and DEVNUM are both set and non-zero, only the device at that address is touched."
)]
struct Arguments {
    /// disable charging instead of enabling it.
    #[argh(switch, short = '0')]
    off: bool,

    /// display version information and exit.
    #[argh(switch, short = 'V')]
    version: bool,
}

impl Arguments {
    fn mode(&self) -> ChargeMode {
        if self.off {
            ChargeMode::Off
        } else {
            ChargeMode::default()
        }
    }
}

/// Splits combined short flags such as `-0V` into `-0 -V`.
fn split_short_flags(args: &[String]) -> Vec<String> {
    let mut split = Vec::with_capacity(args.len());
    let mut flags_done = false;
    for arg in args {
        let cluster = arg
            .strip_prefix('-')
            .filter(|rest| rest.len() > 1 && rest.chars().all(|c| SHORT_FLAGS.contains(c)));
        match cluster {
            Some(rest) if !flags_done => split.extend(rest.chars().map(|c| format!("-{}", c))),
            _ => {
                flags_done |= arg == "--";
                split.push(arg.clone());
            }
        }
    }
    split
}

/// Whether a version request comes before anything that would stop the run.
///
/// Flags are honoured in order, so `-V --bogus` prints the version while
/// `--bogus -V` is a usage error.
fn version_first(args: &[&str]) -> bool {
    for arg in args {
        match *arg {
            "-0" | "--off" => continue,
            "-V" | "--version" => return true,
            _ => return false,
        }
    }
    false
}

fn main() {
    let argv: Vec<String> = env::args().collect();
    let program = argv.first().map(String::as_str).unwrap_or("htc-charge");
    let rest = split_short_flags(argv.get(1..).unwrap_or(&[]));
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

    if version_first(&rest) {
        print!("{}", version());
        return;
    }

    let args = match Arguments::from_args(&[program], &rest) {
        Ok(args) => args,
        Err(exit) => process::exit(early_exit(program, exit)),
    };

    if args.version {
        print!("{}", version());
        return;
    }

    match run(args.mode(), Selector::from_env()) {
        Ok(_) => {}
        Err(err) => {
            error!("Failed", "{}", err);
            process::exit(err.exit_code());
        }
    }
}

/// Prints argh's output and returns the exit status for it.
fn early_exit(program: &str, exit: EarlyExit) -> i32 {
    match exit.status {
        Ok(()) => {
            println!("{}", exit.output);
            0
        }
        Err(()) => {
            eprintln!("{}", exit.output);
            eprintln!("Try '{} --help' for more information.", program);
            EXIT_USAGE
        }
    }
}

fn version() -> String {
    format!(
        "htc-charge v{} - HTC USB charging control utility\n\
         Copyright (c) 2010 Ondrej Zary - http://www.rainbow-software.org\n\
         Modifications: Copyright (c) 2015 Micah Waddoups - http://www.makesharp.net\n\
         License: GPLv2\n",
        env!("CARGO_PKG_VERSION")
    )
}

fn run(mode: ChargeMode, selector: Selector) -> Result<usize, Error> {
    let context = Context::new().map_err(Error::Init)?;
    let devices = context.devices().map_err(Error::Enumerate)?;
    let devices: Vec<_> = devices.iter().collect();

    match selector {
        Selector::Address { bus, address } => {
            info!("Searching", "for the device on bus {} device {}...", bus, address);
        }
        Selector::Table => {
            info!("Searching", "for HTC devices...");
        }
    }

    let matched = htc_charge::select(&devices, &selector);
    htc_charge::charge_all(matched, mode)
}
