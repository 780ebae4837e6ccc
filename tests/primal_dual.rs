use float_eq::assert_float_eq;
use totsu_tv::prelude::*;
use totsu_tv::*;

mod common;

type La = FloatGeneric<f64>;

fn solve(d: &mut PrimalDual<'_, La>, n_iter: usize) -> Vec<f64>
{
    d.run(Budget::Iter(n_iter)).unwrap();
    d.result().unwrap().to_vec()
}

fn blur(n: usize) -> MatBuild<La>
{
    MatBuild::new((n, n)).by_fn(|r, c| {
        if r == c {0.5} else if r + 1 == c || c + 1 == r {0.25} else {0.}
    })
}

//

#[test]
fn test_pd_agreement()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let y = common::noisy(&common::step9(), 0.1, 10);
    let op_a = IdentityOp::new(y.len());
    let obj = Objective::<La>::new(&op_a, 1., &y);

    let mut direct = DirectTv::<La>::new();
    direct.configure(obj.clone()).unwrap();
    direct.run(Budget::Iter(1)).unwrap();
    let u_direct = direct.result().unwrap();

    let mut mm = ScalarMm::<La>::new();
    mm.configure(obj.clone()).unwrap();
    mm.run(Budget::Iter(300)).unwrap();
    let diff = common::max_abs_diff(mm.result().unwrap(), u_direct);
    assert!(diff < 1e-3, "mm: {}", diff);

    for eta in [0.5, 1.] {
        for swap in [true, false] {
            let mut pd = PrimalDual::<La>::new().par(|p| {
                p.eta = eta;
                p.swap = swap;
            });
            pd.configure(obj.clone()).unwrap();
            let u = solve(&mut pd, 3_000);

            let diff = common::max_abs_diff(&u, u_direct);
            assert!(diff < 1e-3, "eta {} swap {}: {}", eta, swap, diff);
        }
    }
}

#[test]
fn test_pd_synthesis()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let y = common::noisy(&common::step9(), 0.1, 11);
    let op_a = IdentityOp::new(y.len());
    let obj = Objective::<La>::new(&op_a, 1., &y).c(0.5);

    let mut direct = DirectTv::<La>::new();
    direct.configure(obj.clone()).unwrap();
    direct.run(Budget::Iter(1)).unwrap();

    let mut pd = PrimalDual::<La>::new().par(|p| {
        p.formulation = Formulation::Synthesis;
    });
    pd.configure(obj.clone()).unwrap();

    // the initial signal is c everywhere in both formulations
    assert_float_eq!(solve(&mut pd, 0).as_slice(), [0.5; 9].as_slice(), abs_all <= 1e-15);

    let u = solve(&mut pd, 5_000);
    let diff = common::max_abs_diff(&u, direct.result().unwrap());
    assert!(diff < 1e-3, "{}", diff);
}

#[test]
fn test_pd_huber_robust()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let x = common::blocks(&[0., 3., 0.], 10);
    let y = common::noisy(&x, 0.1, 12);
    let j = 15;
    let mut y_out = y.clone();
    y_out[j] += 20.;

    let op_a = IdentityOp::new(y.len());
    let reg = 1.;

    let mut change = Vec::new();
    for data_fit in [DataFit::Quad, DataFit::Huber] {
        let mut u = Vec::new();
        for yy in [&y, &y_out] {
            let mut pd = PrimalDual::<La>::new();
            pd.configure(Objective::<La>::new(&op_a, reg, yy).data_fit(data_fit)).unwrap();
            u.push(solve(&mut pd, 3_000));
        }
        change.push((u[1][j] - u[0][j]).abs());
    }

    assert!(change[1] < change[0], "huber {} quad {}", change[1], change[0]);
}

#[test]
fn test_pd_blur()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let n = 24;
    let op_a = blur(n);
    let x = common::blocks(&[0., 4., 1.], 8);
    let mut ax = vec![0.; n];
    totsu_tv::solver::Operator::<La>::op(&op_a, 1., &x, 0., &mut ax);
    let y = common::noisy(&ax, 0.05, 13);

    let obj = Objective::<La>::new(&op_a, 0.1, &y);

    let mut pd = PrimalDual::<La>::new();
    pd.configure(obj.clone()).unwrap();
    let u1 = solve(&mut pd, 3_000);
    let u2 = solve(&mut pd, 6_000);

    assert!(common::max_abs_diff(&u1, &u2) < 1e-6);
    assert!(obj.value(&u1) < obj.value(&y));
    assert!(common::max_abs_diff(&u1, &x) < 0.5);

    // residuals within delta make huber and quad the same problem
    let obj_h = obj.clone().data_fit(DataFit::Huber).delta(5.);
    let mut pd = PrimalDual::<La>::new();
    pd.configure(obj_h).unwrap();
    let u_h = solve(&mut pd, 3_000);
    assert!(common::max_abs_diff(&u1, &u_h) < 1e-5);
}

#[test]
fn test_pd_max_iter()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let y = common::noisy(&common::blocks(&[1., -2.], 6), 1., 14);
    let op_a = IdentityOp::new(y.len());
    let obj = Objective::<La>::new(&op_a, 0.5, &y).data_fit(DataFit::Huber);

    let mut pd = PrimalDual::<La>::new();
    pd.configure(obj).unwrap();

    let mut max_iter = MaxIter::new(40);
    let mut seen = Vec::new();
    let mut monitor = |i: usize, u: &[f64]| {
        seen.push(i);
        assert!(u.iter().all(|e| e.is_finite()));
        max_iter.should_continue(i, u)
    };
    pd.run(Budget::Monitor(&mut monitor)).unwrap();

    // one call per completed iteration plus the initial one, in sequence
    assert_eq!(seen, (0..= 40).collect::<Vec<_>>());
    assert!(pd.result().unwrap().iter().all(|e| e.is_finite()));
}

#[test]
fn test_pd_first_stop()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let y = common::noisy(&common::step9(), 0.5, 15);
    let op_a = IdentityOp::new(y.len());
    let obj = Objective::<La>::new(&op_a, 1., &y);

    let mut pd = PrimalDual::<La>::new().par(|p| p.swap = true);
    pd.configure(obj).unwrap();

    let mut calls = 0;
    let mut last = Vec::new();
    let mut monitor = |i: usize, u: &[f64]| {
        calls += 1;
        last = u.to_vec();
        i != 7
    };
    pd.run(Budget::Monitor(&mut monitor)).unwrap();

    assert_eq!(calls, 8);
    assert_float_eq!(pd.result().unwrap(), last.as_slice(), abs_all <= 0.);
}

#[test]
fn test_pd_sufficient_progress()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let y = common::noisy(&common::step9(), 0.1, 16);
    let op_a = IdentityOp::new(y.len());
    let obj = Objective::<La>::new(&op_a, 1., &y);

    let mut direct = DirectTv::<La>::new();
    direct.configure(obj.clone()).unwrap();
    direct.run(Budget::Iter(1)).unwrap();

    for eta in [0.5, 1.] {
        let mut pd = PrimalDual::<La>::new().par(|p| p.eta = eta);
        pd.configure(obj.clone()).unwrap();

        let mut monitor = SufficientProgress::new(|u: &[f64]| obj.value(u)).max_iter(20_000);
        pd.run(Budget::Monitor(&mut monitor)).unwrap();

        let diff = common::max_abs_diff(pd.result().unwrap(), direct.result().unwrap());
        assert!(diff < 1e-3, "eta {}: {}", eta, diff);
    }
}

#[test]
fn test_pd_rerun()
{
    let y = common::noisy(&common::step9(), 0.3, 17);
    let op_a = IdentityOp::new(y.len());

    let mut pd = PrimalDual::<La>::new();
    pd.configure(Objective::<La>::new(&op_a, 1., &y)).unwrap();

    // nothing carries over between runs
    let u1 = solve(&mut pd, 100);
    let _ = solve(&mut pd, 37);
    let u2 = solve(&mut pd, 100);
    assert_float_eq!(u1.as_slice(), u2.as_slice(), abs_all <= 0.);
}

#[test]
fn test_pd_errors()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let y = common::step9();
    let op_a = IdentityOp::new(y.len());
    let op_bad = blur(y.len() - 1);
    let obj = Objective::<La>::new(&op_a, 1., &y);

    let mut pd = PrimalDual::<La>::new();
    assert_eq!(pd.run(Budget::Iter(1)), Err(TvError::NotConfigured));
    assert_eq!(pd.result(), Err(TvError::NoResult));
    assert_eq!(pd.skip(&obj.clone().data_fit(DataFit::Huber)), None);

    for eta in [0., 2., f64::NAN] {
        let mut pd = PrimalDual::<La>::new().par(|p| p.eta = eta);
        assert_eq!(pd.configure(obj.clone()), Err(TvError::InvalidParam));
    }
    let mut pd = PrimalDual::<La>::new().par(|p| p.sigma = 0.);
    assert_eq!(pd.configure(obj.clone()), Err(TvError::InvalidParam));

    let mut pd = PrimalDual::<La>::new();
    assert_eq!(pd.configure(obj.clone().data_fit(DataFit::Huber).delta(0.)), Err(TvError::InvalidParam));
    assert_eq!(pd.configure(Objective::new(&op_bad, 1., &y)), Err(TvError::InvalidOp));

    // a failed norm calculation aborts the run without a result
    let op_dense = blur(y.len());
    let mut pd = PrimalDual::<La>::new().par(|p| p.max_eig_sweep = 0);
    pd.configure(Objective::new(&op_dense, 1., &y)).unwrap();
    assert_eq!(pd.run(Budget::Iter(10)), Err(TvError::NormFailure));
    assert_eq!(pd.result(), Err(TvError::NoResult));
}

#[test]
fn test_pd_par_changed_after_configure()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let y = common::step9();
    let op_a = IdentityOp::new(y.len());

    let mut pd = PrimalDual::<La>::new();
    pd.configure(Objective::<La>::new(&op_a, 1., &y)).unwrap();
    let _ = solve(&mut pd, 10);

    pd.par.eta = 5.;
    assert_eq!(pd.run(Budget::Iter(200)), Err(TvError::InvalidParam));
    assert_eq!(pd.result(), Err(TvError::NoResult));

    pd.par.eta = 1.;
    pd.par.sigma = f64::INFINITY;
    assert_eq!(pd.run(Budget::Iter(200)), Err(TvError::InvalidParam));

    pd.par.sigma = 0.5;
    assert_eq!(pd.run(Budget::Iter(200)), Ok(()));
}

// y with a single outlier, deterministic
fn outlier12() -> Vec<f64>
{
    let mut y = common::blocks(&[0., 3., 1.], 4);
    for (i, e) in y.iter_mut().enumerate() {
        *e += 0.1 * (7. * i as f64).sin();
    }
    y[5] += 10.;
    y
}

#[test]
fn test_pd_huber_optimality()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let y = outlier12();
    let op_a = IdentityOp::new(y.len());
    let obj = Objective::<La>::new(&op_a, 0.5, &y).data_fit(DataFit::Huber);

    let mut values = Vec::new();
    for formulation in [Formulation::Analysis, Formulation::Synthesis] {
        for eta in [0.5, 1., 1.5] {
            let mut pd = PrimalDual::<La>::new().par(|p| {
                p.formulation = formulation;
                p.eta = eta;
            });
            pd.configure(obj.clone()).unwrap();
            let u = solve(&mut pd, 6_000);

            // no coordinate step improves the objective
            let f = obj.value(&u);
            for j in 0.. u.len() {
                for h in [1e-3, -1e-3] {
                    let mut up = u.clone();
                    up[j] += h;
                    assert!(obj.value(&up) >= f - 1e-9, "{:?} eta {} j {}", formulation, eta, j);
                }
            }
            values.push(f);
        }
    }

    for f in &values {
        assert_float_eq!(*f, values[0], abs <= 1e-7);
    }
}

#[test]
fn test_pd_huber_swap_ignored()
{
    let y = outlier12();
    let op_a = IdentityOp::new(y.len());
    let obj = Objective::<La>::new(&op_a, 0.5, &y).data_fit(DataFit::Huber);

    let mut u = Vec::new();
    for swap in [false, true] {
        let mut pd = PrimalDual::<La>::new().par(|p| p.swap = swap);
        pd.configure(obj.clone()).unwrap();
        u.push(solve(&mut pd, 50));
    }
    assert_float_eq!(u[0].as_slice(), u[1].as_slice(), abs_all <= 0.);
}
