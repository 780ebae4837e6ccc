use float_eq::assert_float_eq;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256StarStar;
use totsu_tv::solver::{LinAlg, Operator};
use totsu_tv::prelude::*;
use totsu_tv::*;

mod common;

type La = FloatGeneric<f64>;

// <K x, y> = <x, K^T y>
fn check_adjoint<O: Operator<La>>(op: &O, seed: u64)
{
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    let (m, n) = op.size();

    let x: Vec<f64> = (0.. n).map(|_| common::gaussian(&mut rng)).collect();
    let y: Vec<f64> = (0.. m).map(|_| common::gaussian(&mut rng)).collect();

    let mut kx = vec![0.; m];
    op.op(1., &x, 0., &mut kx);
    let mut kty = vec![0.; n];
    op.trans_op(1., &y, 0., &mut kty);

    assert_float_eq!(La::inner_prod(&kx, &y), La::inner_prod(&x, &kty), abs <= 1e-10);
}

//

#[test]
fn test_adjoint1()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let n = 7;
    let mat = MatBuild::<La>::new((n, n)).by_fn(|r, c| {
        (r as f64 - 2. * c as f64).sin()
    });

    check_adjoint(&IdentityOp::new(n), 0);
    check_adjoint(&mat, 1);
    check_adjoint(&mat.as_op(), 2);
    check_adjoint(&DiffOp::new(n), 3);
    check_adjoint(&CumSumOp::new(n), 4);
    check_adjoint(&SelectOp::new(n), 5);
    check_adjoint(&ComposeOp::<La, _, _>::new(&mat, CumSumOp::new(n)), 6);
    check_adjoint(&StackOp::<La, _, _>::new(DiffOp::new(n), &mat), 7);
}

#[test]
fn test_adjoint_beta()
{
    // alpha and beta of op/trans_op are honored by composition
    let n = 5;
    let op = StackOp::<La, _, _>::new(DiffOp::new(n), IdentityOp::new(n));

    let x = [1., 2., 4., 8., 16.];
    let y = &mut[1.; 9];
    op.op(2., &x, -1., y);
    assert_float_eq!(y.as_slice(), [1., 3., 7., 15., 1., 3., 7., 15., 31.].as_slice(), abs_all <= 1e-12);

    let z = &mut[1.; 5];
    op.trans_op(1., &[1., 0., 0., 0., 1., 1., 1., 1., 1.], 0.5, z);
    // D^T e_0 = [-1, 1, 0, 0, 0]
    assert_float_eq!(z.as_slice(), [0.5, 2.5, 1.5, 1.5, 1.5].as_slice(), abs_all <= 1e-12);
}

#[test]
fn test_sq_opnorm_stack()
{
    let _ = env_logger::builder().is_test(true).try_init();

    // ||[D; I]||^2 = ||D^T D + I|| = ||D||^2 + 1
    for n in [2, 5, 16] {
        let d = DiffOp::new(n);
        let k = StackOp::<La, _, _>::new(d, IdentityOp::new(n));
        let sq = sq_opnorm::<La, _>(&k, 1e-12, 100).unwrap();
        assert_float_eq!(sq, d.sq_norm::<f64>() + 1., abs <= 1e-8);
    }
}

#[test]
fn test_sq_opnorm_failure()
{
    let _ = env_logger::builder().is_test(true).try_init();

    let n = 6;
    let d = DiffOp::new(n);
    let rslt = sq_opnorm::<La, _>(&d, 1e-12, 0);
    assert_eq!(rslt, Err(TvError::NormFailure));
}
