use rand::seq::SliceRandom;
use rand::Rng;

pub fn random_pick<'a, T, R: Rng + ?Sized>(choices: &'a [T], rng: &mut R) -> Option<&'a T> {
    choices.choose(rng)
}

pub fn random_choice<T, R: Rng + ?Sized>(choices: &[T], rng: &mut R) -> Option<T>
where
    T: Copy,
{
    random_pick(choices, rng).copied()
}
