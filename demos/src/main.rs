// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use env_logger::Env;
use std::time::Instant;
use structopt::StructOpt;
use winterfell::{ExampleOptions, ExampleType};

#[derive(StructOpt, Debug)]
#[structopt(name = "winterfell", about = "STARK prover/verifier examples")]
struct Args {
    #[structopt(subcommand)]
    example: ExampleType,

    #[structopt(flatten)]
    options: ExampleOptions,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::from_args();
    let example = winterfell::get_example(args.example, args.options);

    let now = Instant::now();
    winterfell::run(example);
    log::info!("total time: {} ms", now.elapsed().as_millis());
}
