use crate::policy::ExecPolicy;

use super::{CreateShmem, For, Lambda};

/// Text rendering of a statement type, one node per line, children
/// indented by two spaces.
pub trait Describe {
    fn describe_into(out: &mut String, depth: usize);
}

/// Render a statement tree.
pub fn describe<S: Describe>() -> String {
    let mut out = String::new();
    S::describe_into(&mut out, 0);
    out.truncate(out.trim_end().len());
    out
}

fn line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(text);
    out.push('\n');
}

impl<const I: usize> Describe for Lambda<I> {
    fn describe_into(out: &mut String, depth: usize) {
        line(out, depth, &format!("Lambda<{}>", I));
    }
}

impl<Body: Describe> Describe for CreateShmem<Body> {
    fn describe_into(out: &mut String, depth: usize) {
        line(out, depth, "CreateShmem");
        Body::describe_into(out, depth + 1);
    }
}

impl<const DIM: usize, Pol: ExecPolicy, Body: Describe> Describe for For<DIM, Pol, Body> {
    fn describe_into(out: &mut String, depth: usize) {
        line(out, depth, &format!("For<{}, {}>", DIM, Pol::NAME));
        Body::describe_into(out, depth + 1);
    }
}

impl Describe for () {
    fn describe_into(_out: &mut String, _depth: usize) {}
}

macro_rules! describe_list {
    ($($S:ident),+) => {
        impl<$($S: Describe),+> Describe for ($($S,)+) {
            fn describe_into(out: &mut String, depth: usize) {
                $($S::describe_into(out, depth);)+
            }
        }
    };
}

describe_list!(S0);
describe_list!(S0, S1);
describe_list!(S0, S1, S2);
describe_list!(S0, S1, S2, S3);
describe_list!(S0, S1, S2, S3, S4);
describe_list!(S0, S1, S2, S3, S4, S5);
describe_list!(S0, S1, S2, S3, S4, S5, S6);
describe_list!(S0, S1, S2, S3, S4, S5, S6, S7);
