use float_eq::assert_float_eq;
use totsu_tv::prelude::*;
use totsu_tv::*;

mod common;

type La = FloatGeneric<f64>;

// iterates offered to a monitor, the initial one included
fn iterates<'a, D: Denoiser<'a, La>>(d: &mut D, n_iter: usize) -> Vec<Vec<f64>>
{
    let mut seq = Vec::new();
    let mut monitor = |i: usize, u: &[f64]| {
        seq.push(u.to_vec());
        i < n_iter
    };
    d.run(Budget::Monitor(&mut monitor)).unwrap();
    seq
}

//

#[test]
fn test_mm_converges_to_direct()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let y = common::noisy(&common::step9(), 0.1, 0);
    let op_a = IdentityOp::new(y.len());
    let obj = Objective::<La>::new(&op_a, 1., &y);

    let mut direct = DirectTv::<La>::new();
    direct.configure(obj.clone()).unwrap();
    direct.run(Budget::Iter(1)).unwrap();

    let mut mm = ScalarMm::<La>::new();
    mm.configure(obj).unwrap();
    mm.run(Budget::Iter(300)).unwrap();

    let diff = common::max_abs_diff(mm.result().unwrap(), direct.result().unwrap());
    assert!(diff < 1e-3, "{}", diff);
}

#[test]
fn test_mm_monotone()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let x = common::blocks(&[0., 3., -1., 2.], 10);

    for seed in 0.. 4 {
        let y = common::noisy(&x, 0.5, seed);
        let op_a = IdentityOp::new(y.len());
        let obj = Objective::<La>::new(&op_a, 2., &y);

        let mut mm = ScalarMm::<La>::new();
        mm.configure(obj.clone()).unwrap();
        let seq = iterates(&mut mm, 60);
        assert_eq!(seq.len(), 61);

        for w in seq.windows(2) {
            let (f0, f1) = (obj.value(&w[0]), obj.value(&w[1]));
            assert!(f1 <= f0 + 1e-9 * f0.abs(), "{} -> {}", f0, f1);
        }

        for k in [2, 3, 5] {
            let mut gmm = GroupMm::<La>::new().par(|p| {
                p.group_size = k;
                p.tol = 0.;
            });
            gmm.configure(obj.clone()).unwrap();
            let seq = iterates(&mut gmm, 60);

            for w in seq.windows(2) {
                let (f0, f1) = (obj.group_value(&w[0], k), obj.group_value(&w[1], k));
                assert!(f1 <= f0 + 1e-9 * f0.abs(), "K={}: {} -> {}", k, f0, f1);
            }
        }
    }
}

#[test]
fn test_group_size1_reduction()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let x = common::blocks(&[1., -1., 4.], 7);
    let y = common::noisy(&x, 0.3, 3);
    let op_a = IdentityOp::new(y.len());
    let obj = Objective::<La>::new(&op_a, 1.5, &y);

    let mut mm = ScalarMm::<La>::new();
    mm.configure(obj.clone()).unwrap();
    let seq_s = iterates(&mut mm, 25);

    let mut gmm = GroupMm::<La>::new().par(|p| {
        p.group_size = 1;
        p.tol = 0.;
    });
    gmm.configure(obj.clone()).unwrap();
    let seq_g = iterates(&mut gmm, 25);

    assert_eq!(seq_s.len(), seq_g.len());
    for (us, ug) in seq_s.iter().zip(&seq_g) {
        assert_float_eq!(us.as_slice(), ug.as_slice(), abs_all <= 1e-10);
    }

    assert_float_eq!(obj.group_value(&seq_s[25], 1), obj.value(&seq_s[25]), abs <= 1e-12);
}

#[test]
fn test_group_early_exit()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let x = common::blocks(&[0., 3., -1., 2.], 10);
    let y = common::noisy(&x, 0.5, 5);
    let op_a = IdentityOp::new(y.len());
    let obj = Objective::<La>::new(&op_a, 2., &y);

    let n_iter = 10_000;

    let mut gmm = GroupMm::<La>::new().par(|p| {
        p.group_size = 3;
        p.tol = 1e-8;
    });
    gmm.configure(obj.clone()).unwrap();
    let seq = iterates(&mut gmm, n_iter);
    // the monitor is not consulted after the early exit
    assert!(seq.len() < n_iter, "{}", seq.len());

    // non-positive tol runs the full budget
    let mut gmm = GroupMm::<La>::new().par(|p| {
        p.group_size = 3;
        p.tol = 0.;
    });
    gmm.configure(obj).unwrap();
    let seq = iterates(&mut gmm, 50);
    assert_eq!(seq.len(), 51);
}

#[test]
fn test_mm_reg_zero()
{
    let y = common::noisy(&common::step9(), 0.2, 6);
    let op_a = IdentityOp::new(y.len());

    let mut mm = ScalarMm::<La>::new();
    mm.configure(Objective::new(&op_a, 0., &y)).unwrap();
    mm.run(Budget::Iter(10)).unwrap();
    assert_float_eq!(mm.result().unwrap(), y.as_slice(), abs_all <= 1e-15);
}

#[test]
fn test_mm_errors()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let y = common::step9();
    let op_a = IdentityOp::new(y.len());
    let huber = Objective::<La>::new(&op_a, 1., &y).data_fit(DataFit::Huber);

    let mut mm = ScalarMm::<La>::new();
    assert_eq!(mm.run(Budget::Iter(5)), Err(TvError::NotConfigured));
    assert_eq!(mm.result(), Err(TvError::NoResult));
    assert!(mm.skip(&huber).is_some());
    assert_eq!(mm.configure(huber.clone()), Err(TvError::NotApplicable));

    for k in [0, y.len() + 1] {
        let mut gmm = GroupMm::<La>::new().par(|p| p.group_size = k);
        assert_eq!(gmm.configure(Objective::new(&op_a, 1., &y)), Err(TvError::InvalidParam));
    }

    let mut gmm = GroupMm::<La>::new().par(|p| p.group_size = y.len());
    assert!(gmm.skip(&huber).is_some());
    assert_eq!(gmm.configure(huber), Err(TvError::NotApplicable));
    assert_eq!(gmm.configure(Objective::new(&op_a, 1., &y)), Ok(()));
    gmm.run(Budget::Iter(5)).unwrap();
    assert_eq!(gmm.result().unwrap().len(), y.len());
}

#[test]
fn test_group_par_changed_after_configure()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let y = common::noisy(&common::step9(), 0.2, 7);
    let op_a = IdentityOp::new(y.len());

    let mut gmm = GroupMm::<La>::new().par(|p| p.group_size = 3);
    gmm.configure(Objective::new(&op_a, 1., &y)).unwrap();
    gmm.run(Budget::Iter(5)).unwrap();

    gmm.par.group_size = 0;
    assert_eq!(gmm.run(Budget::Iter(5)), Err(TvError::InvalidParam));
    assert_eq!(gmm.result(), Err(TvError::NoResult));

    gmm.par.group_size = 2;
    gmm.par.tol = f64::NAN;
    assert_eq!(gmm.run(Budget::Iter(5)), Err(TvError::InvalidParam));

    gmm.par.tol = 0.;
    assert_eq!(gmm.run(Budget::Iter(5)), Ok(()));
}
