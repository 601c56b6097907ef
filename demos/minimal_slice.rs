use slice_mcmc::config::SliceConfig;
use slice_mcmc::distributions::IsotropicGaussian;
use slice_mcmc::slice_sampler::SliceSampler;

fn main() {
    let target = IsotropicGaussian::new(1.0);
    let initial_state = [0.0, 0.0];

    // Step-out width 0.5, at most 10 expansions per move.
    let mut sampler = SliceSampler::new(target, (), &initial_state, SliceConfig::default())
        .unwrap()
        .set_seed(42);

    // 1,000 rows; row 0 is the initial state
    let run = sampler.run(1000).unwrap();

    assert_eq!(run.chain.nrows(), 1000);
    assert_eq!(run.likelihoods.len(), 1000);
    println!("{}", run.stats);
}
