mod config;
mod model;
mod output;

use self::model::Simulation;
use self::output::Recorder;
use pbr::ProgressBar;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let conf = config::load_config();
    let steps = conf.steps;
    let mut rng: StdRng = SeedableRng::seed_from_u64(conf.seed);

    let records = match &conf.survey {
        Some(path) => model::load_responses(path).expect("could not load survey data"),
        None => Vec::new(),
    };

    let mut sim = Simulation::new(&conf.simulation, &records, &mut rng);
    let recorder = Recorder::new(&sim, &mut rng);

    if conf.debug {
        let mut pb = ProgressBar::new(steps as u64);
        for _ in 0..steps {
            sim.step(&conf.simulation, &mut rng);
            pb.inc();
        }
    } else {
        for _ in 0..steps {
            sim.step(&conf.simulation, &mut rng);
        }
    }

    recorder.save(&sim, &conf, records.len());
}
