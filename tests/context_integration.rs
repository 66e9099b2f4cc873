//! Integration tests for shared planning and scratch resources.
//!
//! Engines built from one `Context` share its planner and buffer pools;
//! planned shapes survive a process boundary through the wisdom file.

use dealias_core::{
    multbinary, realmultbinary, Context, ExplicitConvolution, ImplicitConvolution,
    ImplicitHConvolution, ImplicitHTConvolution, Nyquist, Options,
};
use dealias_fft::cache::PlanKey;
use dealias_fft::{Direction, FftConfig, PlanEffort, Planner};
use dealias_tests::{assert_close, sample, views};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("dealias_core=debug,dealias_fft=debug")
        .with_test_writer()
        .try_init();
}

#[test]
fn engines_share_one_planner() {
    init_tracing();
    let context = Context::default();
    let m = 32;
    let _complex = ImplicitConvolution::with_context(m, &Options::default(), &context).unwrap();
    let planned = context.planner().cache().len();
    assert!(planned > 0);

    // A second engine of the same shape plans nothing new.
    let _again = ImplicitConvolution::with_context(m, &Options::default(), &context).unwrap();
    assert_eq!(context.planner().cache().len(), planned);

    let _hermitian = ImplicitHConvolution::with_context(m, &Options::default(), &context).unwrap();
    assert!(context.planner().cache().len() >= planned);
}

#[test]
fn scratch_returns_to_pools_and_is_reused() {
    let context = Context::default();
    let m = 24;
    {
        let _engine = ImplicitConvolution::with_context(m, &Options::default(), &context).unwrap();
        let _ternary = ImplicitHTConvolution::with_context(m, &Options::default(), &context).unwrap();
    }
    let pooled = context.complex_pool().total_pooled() + context.real_pool().total_pooled();
    assert!(pooled > 0, "dropped engines should hand scratch back");

    let before = context.complex_pool().stats().hits;
    let _engine = ImplicitConvolution::with_context(m, &Options::default(), &context).unwrap();
    assert!(context.complex_pool().stats().hits > before);
}

#[test]
fn pooled_scratch_does_not_leak_between_engines() {
    let context = Context::default();
    let m = 16;
    let (f, g) = (sample(m, 0.25), sample(m, 3.5));
    let mut reference = vec![f.clone(), g.clone()];
    ImplicitConvolution::binary(m)
        .unwrap()
        .convolve(&mut views(&mut reference), &multbinary, 0);

    for _ in 0..3 {
        let mut engine = ImplicitConvolution::with_context(m, &Options::default(), &context).unwrap();
        let mut data = vec![f.clone(), g.clone()];
        engine.convolve(&mut views(&mut data), &multbinary, 0);
        assert_close(&data[0], &reference[0], 1e-13);
    }
}

#[test]
fn implicit_and_explicit_agree_through_shared_context() {
    let context = Context::default();
    for m in [5, 16, 33] {
        let (f, g) = (sample(m, 1.0), sample(m, 2.0));
        let mut implicit = vec![f.clone(), g.clone()];
        let mut explicit = vec![f, g];
        ImplicitConvolution::with_context(m, &Options::default(), &context)
            .unwrap()
            .convolve(&mut views(&mut implicit), &multbinary, 0);
        ExplicitConvolution::with_context(m, &Options::default(), &context)
            .unwrap()
            .convolve(&mut views(&mut explicit), &multbinary, 0);
        assert_close(&implicit[0], &explicit[0], 1e-12);
    }
}

#[test]
fn threaded_hermitian_matches_sequential() {
    let m = 40;
    let (mut f, mut g) = (sample(m + 1, 0.5), sample(m + 1, 1.5));
    f[m].im = 0.0;
    g[m].im = 0.0;
    let mut sequential = vec![f.clone(), g.clone()];
    let mut threaded = vec![f, g];
    let options = Options::default().nyquist(Nyquist::Explicit);
    ImplicitHConvolution::new(m, &options)
        .unwrap()
        .convolve(&mut views(&mut sequential), &realmultbinary, 0);
    ImplicitHConvolution::new(m, &options.clone().threads(4))
        .unwrap()
        .convolve(&mut views(&mut threaded), &realmultbinary, 0);
    assert_close(&threaded[0], &sequential[0], 1e-13);
}

#[test]
fn wisdom_round_trip() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wisdom.json");
    {
        let context = Context::new(FftConfig::with_wisdom(&path));
        let _engine = ImplicitConvolution::with_context(48, &Options::default(), &context).unwrap();
    }
    assert!(path.exists(), "planner should save wisdom on drop");

    let planner = Planner::new(FftConfig::with_wisdom(&path));
    assert!(planner
        .known_plans()
        .contains(&PlanKey::new(48, Direction::Backward)));
    assert!(planner.cache().len() >= 2);
}

#[test]
fn wisdom_with_other_effort_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wisdom.json");
    let planner = Planner::new(FftConfig::default());
    let _plan = planner.complex(64, Direction::Forward);
    planner.save_wisdom_to(&path).unwrap();

    let config = FftConfig {
        effort: PlanEffort::Estimate,
        ..FftConfig::with_wisdom(&path)
    };
    let other = Planner::new(config);
    assert!(other.cache().is_empty());
}

#[test]
fn malformed_wisdom_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wisdom.json");
    std::fs::write(&path, "not json").unwrap();
    let planner = Planner::new(FftConfig {
        save_on_drop: false,
        ..FftConfig::with_wisdom(&path)
    });
    assert_eq!(planner.warm_from(&path), 0);
    assert!(planner.known_plans().is_empty());
}
