use crate::errors::KSCryptoError;
use crate::ring::{Matrix, Ring};

use itertools::iproduct;

/// Creates the 2x2 identity matrix.
pub fn identity_matrix() -> Matrix {
    [[1, 0], [0, 1]]
}

/// Reduces every entry of `a` into `[0, modulus)`.
pub fn normalize_matrix(a: &Matrix, ring: &Ring) -> Matrix {
    a.map(|row| row.map(|v| ring.normalize(v)))
}

/// Computes the matrix product `C = AB` modulo `m`, where `m` is the modulus of the ring.
pub fn matrix_mul(a: &Matrix, b: &Matrix, ring: &Ring) -> Matrix {
    let mut c = [[0i64; 2]; 2];

    for i in 0..2 {
        for j in 0..2 {
            let mut sum = 0i64;
            for k in 0..2 {
                let term = ring.mul(a[i][k], b[k][j]);
                sum = ring.add(sum, term);
            }
            c[i][j] = sum;
        }
    }
    c
}

/// Multiplies a chain of matrices left to right, reducing after every product.
///
/// An empty chain yields the identity.
pub fn matrix_chain_mul(factors: &[&Matrix], ring: &Ring) -> Matrix {
    factors
        .iter()
        .fold(identity_matrix(), |acc, factor| matrix_mul(&acc, factor, ring))
}

/// Computes `s·A` modulo `m`.
pub fn scalar_mul(s: i64, a: &Matrix, ring: &Ring) -> Matrix {
    a.map(|row| row.map(|v| ring.mul(s, v)))
}

/// Computes `det(A) mod m`, returning a value in `[0, m)`.
pub fn determinant(a: &Matrix, ring: &Ring) -> i64 {
    let ad = ring.mul(a[0][0], a[1][1]);
    let bc = ring.mul(a[0][1], a[1][0]);
    ring.add(ad, -bc)
}

/// Searches `[0, m) x [0, m)` in increasing row-major order for the first `(i, j)` with
/// `A·[i, j]^T ≡ target`.
fn solve_column(a: &Matrix, target: [i64; 2], ring: &Ring) -> Option<[i64; 2]> {
    let m = ring.modulus() as i64;

    iproduct!(0..m, 0..m)
        .find(|&(i, j)| {
            let top = ring.add(ring.mul(i, a[0][0]), ring.mul(j, a[0][1]));
            let bottom = ring.add(ring.mul(i, a[1][0]), ring.mul(j, a[1][1]));
            top == target[0] && bottom == target[1]
        })
        .map(|(i, j)| [i, j])
}

/// Attempts to find the inverse of a 2x2 matrix modulo `m`.
///
/// The inverse is built one column at a time: the first column solves `A x ≡ e_1`, the
/// second solves `A x ≡ e_2`, each by exhaustive search. O(m^2).
///
/// The two columns are found independently and the assembled matrix is never multiplied
/// back against `A`. Over a commutative ring `A·X ≡ I` forces `det(A)` to be a unit, so
/// whenever both columns exist the solutions are unique and `X` is a two-sided inverse.
///
/// # Errors
///
/// Returns `KSCryptoError::NotInvertible` if either column has no solution.
pub fn matrix_inverse(matrix: &Matrix, ring: &Ring) -> Result<Matrix, KSCryptoError> {
    let a = normalize_matrix(matrix, ring);

    let left = solve_column(&a, [1, 0], ring);
    let right = solve_column(&a, [0, 1], ring);

    match (left, right) {
        (Some(l), Some(r)) => Ok([[l[0], r[0]], [l[1], r[1]]]),
        _ => Err(KSCryptoError::NotInvertible(format!(
            "matrix {:?} has no inverse mod {} (det={})",
            a,
            ring.modulus(),
            determinant(&a, ring)
        ))),
    }
}

/// Finds the inverse of `mat` modulo `modulus`.
///
/// Convenience wrapper over [`matrix_inverse`] for callers holding a bare modulus.
pub fn mod_matrix_inverse(mat: &Matrix, modulus: u64) -> Result<Matrix, KSCryptoError> {
    let ring = Ring::try_with(modulus)?;
    matrix_inverse(mat, &ring)
}

#[cfg(test)]
mod tests {
    use super::*;

    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    fn test_ring() -> Ring {
        Ring::try_with(13).unwrap()
    }

    #[test]
    fn test_matrix_mul_ok() {
        let ring = test_ring();
        let a = [[1, 2], [3, 4]];
        let b = [[5, 6], [7, 8]];
        // C[0][0] = (1*5 + 2*7) % 13 = 19 % 13 = 6
        // C[0][1] = (1*6 + 2*8) % 13 = 22 % 13 = 9
        // C[1][0] = (3*5 + 4*7) % 13 = 43 % 13 = 4
        // C[1][1] = (3*6 + 4*8) % 13 = 50 % 13 = 11
        assert_eq!(matrix_mul(&a, &b, &ring), [[6, 9], [4, 11]]);
    }

    #[test]
    fn test_matrix_chain_mul() {
        let ring = test_ring();
        let a = [[1, 2], [3, 4]];
        let b = [[5, 6], [7, 8]];
        let ab = matrix_mul(&a, &b, &ring);
        assert_eq!(matrix_chain_mul(&[&a, &b], &ring), ab);
        assert_eq!(
            matrix_chain_mul(&[&a, &b, &a], &ring),
            matrix_mul(&ab, &a, &ring)
        );
        assert_eq!(matrix_chain_mul(&[], &ring), identity_matrix());
    }

    #[test]
    fn test_scalar_mul() {
        let ring = test_ring();
        assert_eq!(scalar_mul(3, &[[1, 5], [12, 0]], &ring), [[3, 2], [10, 0]]);
    }

    #[test]
    fn test_determinant() {
        let ring = test_ring();
        assert_eq!(determinant(&[[1, 2], [3, 4]], &ring), 11); // -2 mod 13
        assert_eq!(determinant(&[[1, 2], [2, 4]], &ring), 0);
    }

    #[test]
    fn test_matrix_inverse_ok() {
        let ring = Ring::try_with(26).unwrap();
        let matrix = [[3, 3], [2, 5]];
        // det = 9, 9^-1 = 3 mod 26, adj = [[5, 23], [24, 3]]
        // inv = 3 * adj = [[15, 17], [20, 9]] mod 26
        let expected_inv = [[15, 17], [20, 9]];
        match matrix_inverse(&matrix, &ring) {
            Ok(inv) => assert_eq!(inv, expected_inv),
            Err(e) => panic!("Inversion failed: {:?}", e),
        }

        assert_eq!(matrix_mul(&matrix, &expected_inv, &ring), identity_matrix());
        assert_eq!(matrix_mul(&expected_inv, &matrix, &ring), identity_matrix());
    }

    #[test]
    fn test_reference_key_matrices_invert_mod_95() {
        let ring = Ring::try_with(95).unwrap();
        for matrix in [
            [[14, 13], [13, 14]],
            [[12, 11], [11, 12]],
            [[14, 15], [43, 58]],
        ] {
            let inv = matrix_inverse(&matrix, &ring).unwrap();
            assert_eq!(matrix_mul(&matrix, &inv, &ring), identity_matrix());
            assert_eq!(matrix_mul(&inv, &matrix, &ring), identity_matrix());
        }
    }

    #[test]
    fn test_matrix_inverse_singular() {
        let ring = test_ring();
        let matrix = [[1, 2], [2, 4]]; // Row 2 is 2*Row 1
        assert!(matches!(
            matrix_inverse(&matrix, &ring),
            Err(KSCryptoError::NotInvertible(_))
        ));
    }

    #[test]
    fn test_matrix_inverse_non_unit_determinant() {
        // det = 5, which shares a factor with 95
        assert!(mod_matrix_inverse(&[[5, 0], [0, 1]], 95).is_err());
        assert!(mod_matrix_inverse(&[[0, 0], [0, 0]], 95).is_err());
    }

    #[test]
    fn test_matrix_inverse_unnormalized_input() {
        let ring = Ring::try_with(26).unwrap();
        let inv = matrix_inverse(&[[29, -23], [28, 31]], &ring).unwrap();
        assert_eq!(inv, [[15, 17], [20, 9]]);
    }

    #[quickcheck]
    fn prop_inverse_is_two_sided(entries: (u8, u8, u8, u8), modulus: u8) -> TestResult {
        let modulus = modulus % 40;
        if modulus < 2 {
            return TestResult::discard();
        }
        let ring = match Ring::try_with(modulus as u64) {
            Ok(ring) => ring,
            Err(_) => return TestResult::failed(),
        };
        let matrix = [
            [entries.0 as i64, entries.1 as i64],
            [entries.2 as i64, entries.3 as i64],
        ];

        let det_is_unit = ring.is_unit(determinant(&matrix, &ring));
        match matrix_inverse(&matrix, &ring) {
            Ok(inv) if det_is_unit => TestResult::from_bool(
                matrix_mul(&matrix, &inv, &ring) == identity_matrix()
                    && matrix_mul(&inv, &matrix, &ring) == identity_matrix(),
            ),
            Ok(_) => TestResult::failed(),
            Err(_) => TestResult::from_bool(!det_is_unit),
        }
    }
}
