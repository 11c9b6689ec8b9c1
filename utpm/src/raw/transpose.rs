//! Swap the last two trailing axes in every `(d,p)` slice.

use crate::types::Coeffs;

pub fn transpose(a: &Coeffs) -> Coeffs {
    let mut out = a.clone();
    out.swap_axes(2, 3);
    out.as_standard_layout().into_owned()
}
