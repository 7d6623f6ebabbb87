//! Tuple arithmetic backing the join operators.
//!
//! Joining futures produces flat tuples: a join result absorbed into a
//! further join contributes its elements, not itself. `Append` and `Prepend`
//! grow a tuple by one element at either end; `Concat` splices two tuples,
//! defined by peeling the suffix one element at a time.

pub trait Append<T> {
    type Output;

    fn append(self, value: T) -> Self::Output;
}

pub trait Prepend<T> {
    type Output;

    fn prepend(self, value: T) -> Self::Output;
}

pub trait Concat<T> {
    type Output;

    fn concat(self, suffix: T) -> Self::Output;
}

macro_rules! edge_impls {
    ($(($($n:tt $name:ident)+))+) => {
        $(
            impl<$($name,)+ T> Append<T> for ($($name,)+) {
                type Output = ($($name,)+ T,);

                fn append(self, value: T) -> Self::Output {
                    ($(self.$n,)+ value,)
                }
            }

            impl<$($name,)+ T> Prepend<T> for ($($name,)+) {
                type Output = (T, $($name,)+);

                fn prepend(self, value: T) -> Self::Output {
                    (value, $(self.$n,)+)
                }
            }
        )+
    };
}

edge_impls! {
    (0 T0)
    (0 T0 1 T1)
    (0 T0 1 T1 2 T2)
    (0 T0 1 T1 2 T2 3 T3)
    (0 T0 1 T1 2 T2 3 T3 4 T4)
    (0 T0 1 T1 2 T2 3 T3 4 T4 5 T5)
    (0 T0 1 T1 2 T2 3 T3 4 T4 5 T5 6 T6)
    (0 T0 1 T1 2 T2 3 T3 4 T4 5 T5 6 T6 7 T7)
}

impl<L: Append<R0>, R0> Concat<(R0,)> for L {
    type Output = <L as Append<R0>>::Output;

    fn concat(self, suffix: (R0,)) -> Self::Output {
        self.append(suffix.0)
    }
}

macro_rules! concat_impls {
    ($(($head:ident $($n:tt $rest:ident)+))+) => {
        $(
            impl<L, $head, $($rest,)+> Concat<($head, $($rest,)+)> for L
            where
                L: Append<$head>,
                <L as Append<$head>>::Output: Concat<($($rest,)+)>,
            {
                type Output = <<L as Append<$head>>::Output as Concat<($($rest,)+)>>::Output;

                fn concat(self, suffix: ($head, $($rest,)+)) -> Self::Output {
                    self.append(suffix.0).concat(($(suffix.$n,)+))
                }
            }
        )+
    };
}

concat_impls! {
    (R0 1 R1)
    (R0 1 R1 2 R2)
    (R0 1 R1 2 R2 3 R3)
    (R0 1 R1 2 R2 3 R3 4 R4)
    (R0 1 R1 2 R2 3 R3 4 R4 5 R5)
    (R0 1 R1 2 R2 3 R3 4 R4 5 R5 6 R6)
    (R0 1 R1 2 R2 3 R3 4 R4 5 R5 6 R6 7 R7)
}
