use num_traits::{Float, Zero, One};
use core::marker::PhantomData;
use crate::solver::{LinAlg, Operator};

//

/// First difference operator
///
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
///
/// \\(D \in \mathbb{R}^{(n-1) \times n}\\), \\((Du)\_i = u\_{i+1} - u\_i\\).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOp
{
    n: usize,
}

impl DiffOp
{
    /// Creates an instance acting on signals of length `n`.
    pub fn new(n: usize) -> Self
    {
        DiffOp {n}
    }

    /// Squared 2-norm \\(\\|D\\|_2^2 = 2 + 2\cos(\pi / n)\\), the largest eigenvalue of the path graph Laplacian \\(D^TD\\).
    pub fn sq_norm<F: Float>(&self) -> F
    {
        if self.n < 2 {
            F::zero()
        }
        else {
            let f2 = F::one() + F::one();
            let pi = F::from(core::f64::consts::PI).unwrap();
            f2 + f2 * (pi / F::from(self.n).unwrap()).cos()
        }
    }
}

impl<L: LinAlg> Operator<L> for DiffOp
{
    fn size(&self) -> (usize, usize)
    {
        (self.n.saturating_sub(1), self.n)
    }

    fn op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        assert_eq!(x.len(), self.n);
        assert_eq!(y.len(), self.n.saturating_sub(1));

        for (i, v) in y.iter_mut().enumerate() {
            *v = alpha * (x[i + 1] - x[i]) + beta * *v;
        }
    }

    fn trans_op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        assert_eq!(x.len(), self.n.saturating_sub(1));
        assert_eq!(y.len(), self.n);

        let f0 = L::F::zero();

        for (j, v) in y.iter_mut().enumerate() {
            let prev = if j > 0 {x[j - 1]} else {f0};
            let next = if j < x.len() {x[j]} else {f0};
            *v = alpha * (prev - next) + beta * *v;
        }
    }
}

//

/// Cumulative sum operator
///
/// \\(L \in \mathbb{R}^{n \times n}\\), \\((Lz)\_i = \sum\_{k \le i} z\_k\\),
/// which synthesizes a signal from its initial value and increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CumSumOp
{
    n: usize,
}

impl CumSumOp
{
    /// Creates an instance of size `n`.
    pub fn new(n: usize) -> Self
    {
        CumSumOp {n}
    }
}

impl<L: LinAlg> Operator<L> for CumSumOp
{
    fn size(&self) -> (usize, usize)
    {
        (self.n, self.n)
    }

    fn op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        assert_eq!(x.len(), self.n);
        assert_eq!(y.len(), self.n);

        let mut acc = L::F::zero();
        for (u, v) in x.iter().zip(y) {
            acc = acc + *u;
            *v = alpha * acc + beta * *v;
        }
    }

    fn trans_op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        assert_eq!(x.len(), self.n);
        assert_eq!(y.len(), self.n);

        let mut acc = L::F::zero();
        for (u, v) in x.iter().zip(y).rev() {
            acc = acc + *u;
            *v = alpha * acc + beta * *v;
        }
    }
}

//

/// Selection operator
///
/// \\(S \in \mathbb{R}^{(n-1) \times n}\\), \\((Sz)\_i = z\_{i+1}\\), which drops the first element.
/// \\(D L = S\\) holds for [`DiffOp`] \\(D\\) and [`CumSumOp`] \\(L\\).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOp
{
    n: usize,
}

impl SelectOp
{
    /// Creates an instance acting on vectors of length `n`.
    pub fn new(n: usize) -> Self
    {
        SelectOp {n}
    }
}

impl<L: LinAlg> Operator<L> for SelectOp
{
    fn size(&self) -> (usize, usize)
    {
        (self.n.saturating_sub(1), self.n)
    }

    fn op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        assert_eq!(x.len(), self.n);

        L::scale(beta, y);
        L::add(alpha, &x[1..], y);
    }

    fn trans_op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        assert_eq!(y.len(), self.n);

        let (y_0, y_rest) = y.split_at_mut(1);
        L::scale(beta, y_0);
        L::scale(beta, y_rest);
        L::add(alpha, x, y_rest);
    }
}

//

/// Composed operator \\(PQ\\)
///
/// Applies `Q` and then `P`, using a temporary vector of the intermediate size.
pub struct ComposeOp<L, P, Q>
where L: LinAlg, P: Operator<L>, Q: Operator<L>
{
    ph_l: PhantomData<L>,
    p: P,
    q: Q,
}

impl<L, P, Q> ComposeOp<L, P, Q>
where L: LinAlg, P: Operator<L>, Q: Operator<L>
{
    /// Creates an instance of \\(PQ\\).
    pub fn new(p: P, q: Q) -> Self
    {
        assert_eq!(p.size().1, q.size().0);

        ComposeOp {
            ph_l: PhantomData,
            p, q,
        }
    }
}

impl<L, P, Q> Operator<L> for ComposeOp<L, P, Q>
where L: LinAlg, P: Operator<L>, Q: Operator<L>
{
    fn size(&self) -> (usize, usize)
    {
        (self.p.size().0, self.q.size().1)
    }

    fn op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        let f0 = L::F::zero();
        let f1 = L::F::one();

        let mut t = alloc::vec![f0; self.q.size().0];
        self.q.op(f1, x, f0, &mut t);
        self.p.op(alpha, &t, beta, y);
    }

    fn trans_op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        let f0 = L::F::zero();
        let f1 = L::F::one();

        let mut t = alloc::vec![f0; self.p.size().1];
        self.p.trans_op(f1, x, f0, &mut t);
        self.q.trans_op(alpha, &t, beta, y);
    }
}

//

/// Stacked operator \\(\begin{bmatrix} P \\\\ Q \end{bmatrix}\\)
pub struct StackOp<L, P, Q>
where L: LinAlg, P: Operator<L>, Q: Operator<L>
{
    ph_l: PhantomData<L>,
    p: P,
    q: Q,
}

impl<L, P, Q> StackOp<L, P, Q>
where L: LinAlg, P: Operator<L>, Q: Operator<L>
{
    /// Creates an instance stacking `p` over `q`.
    pub fn new(p: P, q: Q) -> Self
    {
        assert_eq!(p.size().1, q.size().1);

        StackOp {
            ph_l: PhantomData,
            p, q,
        }
    }
}

impl<L, P, Q> Operator<L> for StackOp<L, P, Q>
where L: LinAlg, P: Operator<L>, Q: Operator<L>
{
    fn size(&self) -> (usize, usize)
    {
        (self.p.size().0 + self.q.size().0, self.p.size().1)
    }

    fn op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        let (y_p, y_q) = y.split_at_mut(self.p.size().0);

        self.p.op(alpha, x, beta, y_p);
        self.q.op(alpha, x, beta, y_q);
    }

    fn trans_op(&self, alpha: L::F, x: &[L::F], beta: L::F, y: &mut[L::F])
    {
        let (x_p, x_q) = x.split_at(self.p.size().0);

        self.p.trans_op(alpha, x_p, beta, y);
        self.q.trans_op(alpha, x_q, L::F::one(), y);
    }
}

//

#[test]
fn test_diffop1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let d = DiffOp::new(4);
    let y = &mut[0.; 3];
    Operator::<L>::op(&d, 1., &[1., 3., 2., 2.], 0., y);
    assert_float_eq!(y.as_slice(), [2., -1., 0.].as_slice(), abs_all <= 1e-12);

    let yt = &mut[0.; 4];
    Operator::<L>::trans_op(&d, 1., &[1., 2., 3.], 0., yt);
    assert_float_eq!(yt.as_slice(), [-1., -1., -1., 3.].as_slice(), abs_all <= 1e-12);
}

#[test]
fn test_cumsum_select1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let n = 5;
    let z = &[2., 1., -1., 0., 3.];
    let u = &mut[0.; 5];
    Operator::<L>::op(&CumSumOp::new(n), 1., z, 0., u);
    assert_float_eq!(u.as_slice(), [2., 3., 2., 2., 5.].as_slice(), abs_all <= 1e-12);

    // D L z = S z
    let du = &mut[0.; 4];
    let sz = &mut[0.; 4];
    Operator::<L>::op(&DiffOp::new(n), 1., u, 0., du);
    Operator::<L>::op(&SelectOp::new(n), 1., z, 0., sz);
    assert_float_eq!(du.as_slice(), sz.as_slice(), abs_all <= 1e-12);
}
