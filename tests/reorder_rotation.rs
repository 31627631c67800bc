//! Reversal, reordering, permutation and rotation keep values paired with
//! their coordinates.

mod test_utils;

use dimarray::{DimArray, DimTag, Direction, Order, OrderTarget, Reorder, Selector, Span};
use ndarray::array;
use pretty_assertions::assert_eq;
use test_utils::{init_logging, regular_dim, xy_array};

#[test]
fn test_reverse_index_order_on_y() -> anyhow::Result<()> {
    init_logging();
    let a = xy_array();
    let b = a.reverse(OrderTarget::IndexOrder, DimTag::Y)?;

    assert_eq!(b.data(), &array![[3.0, 2.0, 1.0], [6.0, 5.0, 4.0]].into_dyn());
    assert_eq!(b.index(DimTag::Y)?.to_points(), Some(vec![300.0, 200.0, 100.0]));
    assert_eq!(b.dim(DimTag::X)?, a.dim(DimTag::X)?);

    let order = b.dim(DimTag::Y)?.order().expect("sampled dims are ordered");
    assert_eq!(order.index_order(), Some(Direction::Reverse));
    assert_eq!(order.array_order(), Some(Direction::Forward));
    assert_eq!(order.relation(), Some(Direction::Reverse));
    Ok(())
}

#[test]
fn test_every_reversal_keeps_the_pairing() -> anyhow::Result<()> {
    let a = xy_array();
    for target in [
        OrderTarget::IndexOrder,
        OrderTarget::ArrayOrder,
        OrderTarget::Relation,
    ] {
        let b = a.reverse(target, DimTag::Y)?;
        for y in [100.0, 200.0, 300.0] {
            let at = [(DimTag::X, Selector::at(20.0)), (DimTag::Y, Selector::at(y))];
            let before = a.get(at.clone())?;
            let after = b.get(at)?;
            assert_eq!(before, after, "{} at Y={}", target, y);
        }
        assert!(b.dim(DimTag::Y)?.order().is_some_and(|o| o.is_consistent()));
    }
    Ok(())
}

#[test]
fn test_reorder_to_reverse_relation() -> anyhow::Result<()> {
    let a = xy_array();
    let b = a.reorder([
        (DimTag::X, Reorder::Relation(Direction::Reverse)),
        (DimTag::Y, Reorder::IndexOrder(Direction::Forward)),
    ])?;
    assert_eq!(b.dim(DimTag::Y)?, a.dim(DimTag::Y)?);
    assert_eq!(b.dim(DimTag::X)?.mode().span(), Some(Span::Regular(-10.0)));
    assert_eq!(
        b.dim(DimTag::X)?.order(),
        Some(Order::ordered(Direction::Forward, Direction::Reverse))
    );
    assert_eq!(b.data(), &array![[4.0, 5.0, 6.0], [1.0, 2.0, 3.0]].into_dyn());

    let back = b.reorder([(DimTag::X, Reorder::ArrayOrder(Direction::Forward))])?;
    assert_eq!(back, a);
    Ok(())
}

#[test]
fn test_reverse_several_dims() -> anyhow::Result<()> {
    let a = xy_array();
    let b = a.reverse_dims(OrderTarget::ArrayOrder, [DimTag::X, DimTag::Y])?;
    assert_eq!(b, a.rot180()?);
    Ok(())
}

#[test]
fn test_four_quarter_turns() -> anyhow::Result<()> {
    let a = xy_array();
    let mut b = a.clone();
    for _ in 0..4 {
        b = b.rotl90(1)?;
    }
    assert_eq!(b, a);
    assert_eq!(a.rotl90(4)?, a);
    assert_eq!(a.rotr90(-3)?, a.rotl90(3)?);
    assert_eq!(a.rotr90(1)?.rotr90(1)?, a.rot180()?);
    Ok(())
}

#[test]
fn test_rotation_moves_coordinates_with_values() -> anyhow::Result<()> {
    let a = xy_array();
    let r = a.rotr90(1)?;
    assert_eq!(r.dims()[0].name(), "Y");
    assert_eq!(r.dims()[1].name(), "X");
    for (x, y, value) in [(10.0, 100.0, 1.0), (20.0, 300.0, 6.0), (10.0, 200.0, 2.0)] {
        let got = r.get([(DimTag::X, Selector::at(x)), (DimTag::Y, Selector::at(y))])?;
        assert_eq!(got, value);
    }
    Ok(())
}

#[test]
fn test_permute_three_dims() -> anyhow::Result<()> {
    let a = DimArray::from_shape_vec(
        vec![
            regular_dim(DimTag::X, 0.0, 1.0, 2),
            regular_dim(DimTag::Y, 0.0, 1.0, 3),
            regular_dim(DimTag::Ti, 0.0, 1.0, 4),
        ],
        (0..24).map(f64::from).collect(),
    )?;
    let b = a.permute([DimTag::Ti, DimTag::X, DimTag::Y])?;
    assert_eq!(b.shape(), &[4, 2, 3]);
    assert_eq!(b.data()[[3, 1, 2]], a.data()[[1, 2, 3]]);

    let t = a.transpose();
    assert_eq!(t.dims()[0].name(), "Ti");
    assert_eq!(t.data()[[3, 2, 1]], a.data()[[1, 2, 3]]);
    assert!(a.rotl90(1).is_err());
    Ok(())
}
