//! In-place quicksort used to establish the index order of predicate entries.
//! See <https://en.wikipedia.org/wiki/Quicksort>.

use std::cmp::Ordering;

/// Slices up to this length are finished with insertion sort.
const INSERTION_THRESHOLD: usize = 16;

/// Sorts the slice in ascending order. Not stable, O(n log n) expected and O(log n) stack depth.
/// Runs of equal keys are set aside in a single pass, so duplicates do not degrade the running time.
pub fn quicksort<T: Ord + Copy>(mut v: &mut [T]) {
    // recurse into the smaller partition, loop on the larger one
    while v.len() > INSERTION_THRESHOLD {
        let (lt, gt) = partition(v);
        let (left, rest) = std::mem::take(&mut v).split_at_mut(lt);
        let right = &mut rest[gt - lt..];
        if left.len() < right.len() {
            quicksort(left);
            v = right;
        } else {
            quicksort(right);
            v = left;
        }
    }
    insertion_sort(v);
}

fn insertion_sort<T: Ord + Copy>(v: &mut [T]) {
    for i in 1..v.len() {
        let x = v[i];
        let mut j = i;
        while j > 0 && v[j - 1] > x {
            v[j] = v[j - 1];
            j -= 1;
        }
        v[j] = x;
    }
}

/// Median of three moved to the last position.
fn choose_pivot<T: Ord + Copy>(v: &mut [T]) {
    let high = v.len() - 1;
    let mid = high / 2;
    if v[mid] < v[0] {
        v.swap(0, mid);
    }
    if v[high] < v[0] {
        v.swap(0, high);
    }
    // now v[0] is the minimum, the median is the smaller of the other two
    if v[mid] < v[high] {
        v.swap(mid, high);
    }
}

/// Three-way partition around the median of three.
/// Returns `(lt, gt)` such that `v[..lt]` is less than, `v[lt..gt]` equal to and `v[gt..]` greater than
/// the pivot. The middle range is never empty.
fn partition<T: Ord + Copy>(v: &mut [T]) -> (usize, usize) {
    choose_pivot(v);
    let pivot = v[v.len() - 1];
    let (mut lt, mut i, mut gt) = (0, 0, v.len());
    while i < gt {
        match v[i].cmp(&pivot) {
            Ordering::Less => {
                v.swap(lt, i);
                lt += 1;
                i += 1;
            }
            Ordering::Greater => {
                gt -= 1;
                v.swap(i, gt);
            }
            Ordering::Equal => i += 1,
        }
    }
    (lt, gt)
}
